mod test_utils;

mod appointments_test;
mod auth_test;
mod middleware_test;
mod reports_test;
mod time_entries_test;
mod workers_test;
