/// Everything the event loop can ask the app to do.
///
/// Pure state moves are applied directly; the ones that run an external tool
/// (`RunPrimary`, `ExportPdfSelected`, `Refresh`) draw a busy frame first and
/// block until the tool exits.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    SwitchScreen,
    ToggleFilesPanel,
    /// Refetch the pattern catalog and re-list the results directory.
    Refresh,
    /// Re-list the results directory only.
    RefreshFiles,
    FocusNext,
    FocusPrev,
    /// Run the visible screen's blocking action (generate or transcribe).
    RunPrimary,
    ModePrev,
    ModeNext,
    ModelPrev,
    ModelNext,
    WhisperModelPrev,
    WhisperModelNext,
    TaskPrev,
    TaskNext,
    PatternUp(usize),
    PatternDown(usize),
    InsertChar(char),
    PasteText(String),
    DeleteBack,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp(usize),
    ScrollDown(usize),
    FileUp,
    FileDown,
    PreviewSelected,
    ExportPdfSelected,
    DeleteSelected,
}
