pub mod local_tests;
