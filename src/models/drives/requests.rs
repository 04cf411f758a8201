use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialRequest {
    pub name: String,
    pub drive_id: i64,
}
