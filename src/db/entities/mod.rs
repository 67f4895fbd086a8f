#[allow(unused_imports)]
pub mod prelude {
    pub use super::room::Entity as Room;
}

pub mod room;
