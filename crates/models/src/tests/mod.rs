/// Entity CRUD and relation traversal on an in-memory SQLite database
pub mod crud_tests;
