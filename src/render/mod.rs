mod screen;

pub use screen::Screen;
