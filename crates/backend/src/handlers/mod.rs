pub mod a001_product_category;
pub mod a002_media_attachment;
pub mod a003_storefront_page;
pub mod admin;
pub mod storefront;
