pub mod access;
pub mod attendance;
pub mod departments;
pub mod health;
pub mod reports;
pub mod users;
pub mod vendor;

#[cfg(test)]
pub(crate) mod test_support;
