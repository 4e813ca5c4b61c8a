use crate::app::App;

mod app;
mod components;
mod config;
mod theme;

fn main() {
    yew::Renderer::<App>::new().render();
}
