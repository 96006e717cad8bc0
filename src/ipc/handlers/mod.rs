pub mod attendance;
pub mod backup;
pub mod core;
pub mod courses;
pub mod homework;
pub mod students;
