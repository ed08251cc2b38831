/// CRUD operations and relation tests for the directory entities
pub mod crud_tests;
