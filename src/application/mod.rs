pub mod create_cache;
