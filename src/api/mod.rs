pub mod nhtsa;
