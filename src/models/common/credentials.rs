use crate::utils::password::verify_password;

/// 带登录凭据的账号（所有者、教师、学生）
pub trait Credentials {
    fn username(&self) -> &str;
    fn password_hash(&self) -> &str;

    /// 校验明文密码
    fn check_password(&self, password: &str) -> bool {
        verify_password(password, self.password_hash())
    }
}
