use std::sync::Arc;

use crate::adapters::{AppConfig, FFmpegAdapter, FFprobeAdapter};
use crate::app::dispatch_interactor::DispatchInteractor;
use crate::planner::CommandBuilder;
use crate::ports::{ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn dispatch_interactor(&self) -> Arc<DispatchInteractor>;
}

/// Wires the ffprobe/ffmpeg adapters into the dispatcher
pub struct DefaultAppContainer {
    dispatch_interactor: Arc<DispatchInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(&config.ffprobe));
        let execute_port = Arc::new(FFmpegAdapter::new(&config.ffmpeg));

        let dispatch_interactor = Arc::new(DispatchInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExecutePort>,
            CommandBuilder::new(config.build_options()),
        ));

        Self {
            dispatch_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn dispatch_interactor(&self) -> Arc<DispatchInteractor> {
        Arc::clone(&self.dispatch_interactor)
    }
}
