pub mod badges;
pub mod detail_card;
pub mod user_box;

pub use badges::DescriptionView;
pub use detail_card::{CardLayout, UserDetailCard};
pub use user_box::UserBox;
