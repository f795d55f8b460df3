pub mod d6;

pub use d6::{create_d6, d6_pip_positions, pip_pattern, PIP_RADIUS};
