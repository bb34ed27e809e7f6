/// Integration test target root
mod basic_integration;
