#![cfg(test)]

pub mod provider_tests;
