pub mod todo_store;
