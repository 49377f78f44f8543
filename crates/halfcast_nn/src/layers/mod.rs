pub mod half_conversion;
