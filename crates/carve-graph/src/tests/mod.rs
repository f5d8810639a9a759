mod builder_tests;
mod property_tests;
