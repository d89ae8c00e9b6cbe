pub mod supabase;
pub mod supabase_dto;
pub mod utils;
pub mod yahoo;
pub mod yahoo_dto;
