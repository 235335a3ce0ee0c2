pub mod icon_gen;
pub mod png_chunks;
