/// Unit test target root
mod basic_tests;
