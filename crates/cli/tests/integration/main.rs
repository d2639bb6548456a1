mod common;

mod check_tests;
mod compiler_tests;
mod networks_tests;
mod show_tests;
