mod notification_test;
pub mod support;
