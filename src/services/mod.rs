mod context;
pub mod room_service;

pub use context::ServiceContext;
pub use room_service::RoomService;
