pub mod tga;
