pub mod constants;
pub mod coordinates;

pub use constants::*;
pub use coordinates::{
    decimal_to_sexagesimal_dec, decimal_to_sexagesimal_ra, format_degrees, parse_coordinate_dec,
    parse_coordinate_ra, parse_dec, parse_ra, sexagesimal_dec_to_decimal,
    sexagesimal_ra_to_decimal, Sexagesimal, Sign,
};
