pub mod gallery_models;
