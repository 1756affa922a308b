mod signal_sink;
mod signaling_service;
mod ws_handler;

pub use signal_sink::SignalSink;
pub use signaling_service::SignalingService;
pub use ws_handler::ws_handler;
