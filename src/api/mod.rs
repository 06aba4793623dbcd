pub mod coincheck;
