pub mod client_ip;
pub mod hash_ip;
pub mod industry;
pub mod landing;
pub mod pixel;
