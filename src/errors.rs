//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_schoolhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SchoolHubError {
            $($variant(String),)*
        }

        impl SchoolHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_schoolhub_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Integrity("E004", "Integrity Constraint Violation"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
}

impl SchoolHubError {
    /// 将数据库错误归类：唯一键或外键冲突归为完整性错误
    pub fn from_db<C: fmt::Display>(context: C, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                SchoolHubError::Integrity(format!("{context}: 唯一约束冲突: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                SchoolHubError::Integrity(format!("{context}: 外键约束冲突: {detail}"))
            }
            _ => match err {
                DbErr::RecordNotFound(msg) => SchoolHubError::NotFound(format!("{context}: {msg}")),
                DbErr::RecordNotUpdated => {
                    SchoolHubError::NotFound(format!("{context}: 记录不存在"))
                }
                other => SchoolHubError::DatabaseOperation(format!("{context}: {other}")),
            },
        }
    }

    /// 是否为完整性约束错误
    pub fn is_integrity(&self) -> bool {
        matches!(self, SchoolHubError::Integrity(_))
    }

    /// 是否为资源不存在错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, SchoolHubError::NotFound(_))
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SchoolHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolHubError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolHubError {
    fn from(err: DbErr) -> Self {
        SchoolHubError::from_db("数据库操作失败", err)
    }
}

impl From<serde_json::Error> for SchoolHubError {
    fn from(err: serde_json::Error) -> Self {
        SchoolHubError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolHubError>;
