pub mod detail_overlay;
pub mod footer;
pub mod header;
pub mod picker_overlay;
pub mod render;
pub mod spinner;
pub mod startup;
pub mod table;
pub mod zero_data;
