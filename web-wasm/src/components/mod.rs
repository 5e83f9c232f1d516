//! UIコンポーネント

pub mod charts;
pub mod damage_list;
pub mod detail_panel;
pub mod excluded_list;
pub mod filter_bar;
pub mod header;
pub mod status_board;
pub mod summary_cards;
