pub use self::widgets::GameDisplay;

mod widgets;
