pub mod histogram;
pub mod quantize;
pub mod score;
pub mod source;
