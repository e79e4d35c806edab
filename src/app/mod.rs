pub mod dispatcher;
pub mod navigate;
pub mod view;
