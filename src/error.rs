/// Conditions reported by the playback controller. None of them are fatal:
/// the controller is always left either idle or playing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RadioError {
    #[error("station has not been set up")]
    NotConfigured,

    #[error("already playing")]
    AlreadyPlaying,

    #[error("already paused")]
    AlreadyPaused,

    #[error("stream for {station} failed")]
    StreamFailed { station: String },
}
