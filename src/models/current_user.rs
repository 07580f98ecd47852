/// The user on whose behalf a log is created
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub usr: String,
}
