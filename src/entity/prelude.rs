//! 预导入模块，方便使用

pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::chatrooms::{
    ActiveModel as ChatroomActiveModel, Entity as Chatrooms, Model as ChatroomModel,
};
pub use super::chats::{ActiveModel as ChatActiveModel, Entity as Chats, Model as ChatModel};
pub use super::classroom_materials::{
    ActiveModel as ClassroomMaterialActiveModel, Entity as ClassroomMaterials,
};
pub use super::classrooms::{
    ActiveModel as ClassroomActiveModel, Entity as Classrooms, Model as ClassroomModel,
};
pub use super::drives::{ActiveModel as DriveActiveModel, Entity as Drives, Model as DriveModel};
pub use super::educators::{
    ActiveModel as EducatorActiveModel, Entity as Educators, Model as EducatorModel,
};
pub use super::gradebook_students::{
    ActiveModel as GradebookStudentActiveModel, Entity as GradebookStudents,
};
pub use super::gradebooks::{
    ActiveModel as GradebookActiveModel, Entity as Gradebooks, Model as GradebookModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::jwt_token_blocklist::{
    ActiveModel as BlockedTokenActiveModel, Entity as JwtTokenBlocklist,
    Model as BlockedTokenModel,
};
pub use super::materials::{
    ActiveModel as MaterialActiveModel, Entity as Materials, Model as MaterialModel,
};
pub use super::owners::{ActiveModel as OwnerActiveModel, Entity as Owners, Model as OwnerModel};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::schools::{ActiveModel as SchoolActiveModel, Entity as Schools, Model as SchoolModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::user_materials::{ActiveModel as UserMaterialActiveModel, Entity as UserMaterials};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
