pub mod type_conversion;
