use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumIter, EnumString)]
pub enum Role {
    Admin,
    #[default]
    User,
}
