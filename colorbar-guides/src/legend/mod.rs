pub mod colorbar;
