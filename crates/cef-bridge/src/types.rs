//! Typed enums and flag sets for the library's integer codes
//!
//! Codes the library may extend in later versions convert losslessly: plain
//! enums keep unrecognised values in an `Other` variant (or map to the
//! library's own "unknown" member), flag sets retain unknown bits.

use bitflags::bitflags;
use cef_sys::*;
use std::os::raw::{c_int, c_uint};

/// Result of `on_before_resource_load`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReturnValue {
    /// Cancel immediately
    Cancel,
    /// Continue immediately
    #[default]
    Continue,
    /// Continue later through the callback
    ContinueAsync,
}

impl ReturnValue {
    pub fn to_raw(self) -> cef_return_value_t {
        match self {
            ReturnValue::Cancel => RV_CANCEL,
            ReturnValue::Continue => RV_CONTINUE,
            ReturnValue::ContinueAsync => RV_CONTINUE_ASYNC,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowOpenDisposition {
    Unknown,
    CurrentTab,
    SingletonTab,
    NewForegroundTab,
    NewBackgroundTab,
    NewPopup,
    NewWindow,
    SaveToDisk,
    OffTheRecord,
    IgnoreAction,
}

impl WindowOpenDisposition {
    pub fn from_raw(code: cef_window_open_disposition_t) -> Self {
        match code {
            WOD_CURRENT_TAB => Self::CurrentTab,
            WOD_SINGLETON_TAB => Self::SingletonTab,
            WOD_NEW_FOREGROUND_TAB => Self::NewForegroundTab,
            WOD_NEW_BACKGROUND_TAB => Self::NewBackgroundTab,
            WOD_NEW_POPUP => Self::NewPopup,
            WOD_NEW_WINDOW => Self::NewWindow,
            WOD_SAVE_TO_DISK => Self::SaveToDisk,
            WOD_OFF_THE_RECORD => Self::OffTheRecord,
            WOD_IGNORE_ACTION => Self::IgnoreAction,
            _ => Self::Unknown,
        }
    }

    pub fn to_raw(self) -> cef_window_open_disposition_t {
        match self {
            Self::Unknown => WOD_UNKNOWN,
            Self::CurrentTab => WOD_CURRENT_TAB,
            Self::SingletonTab => WOD_SINGLETON_TAB,
            Self::NewForegroundTab => WOD_NEW_FOREGROUND_TAB,
            Self::NewBackgroundTab => WOD_NEW_BACKGROUND_TAB,
            Self::NewPopup => WOD_NEW_POPUP,
            Self::NewWindow => WOD_NEW_WINDOW,
            Self::SaveToDisk => WOD_SAVE_TO_DISK,
            Self::OffTheRecord => WOD_OFF_THE_RECORD,
            Self::IgnoreAction => WOD_IGNORE_ACTION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationStatus {
    AbnormalTermination,
    ProcessWasKilled,
    ProcessCrashed,
    Other(c_int),
}

impl TerminationStatus {
    pub fn from_raw(code: cef_termination_status_t) -> Self {
        match code {
            TS_ABNORMAL_TERMINATION => Self::AbnormalTermination,
            TS_PROCESS_WAS_KILLED => Self::ProcessWasKilled,
            TS_PROCESS_CRASHED => Self::ProcessCrashed,
            other => Self::Other(other),
        }
    }

    pub fn to_raw(self) -> cef_termination_status_t {
        match self {
            Self::AbnormalTermination => TS_ABNORMAL_TERMINATION,
            Self::ProcessWasKilled => TS_PROCESS_WAS_KILLED,
            Self::ProcessCrashed => TS_PROCESS_CRASHED,
            Self::Other(code) => code,
        }
    }
}

/// Generates an enum over named codes plus `Other(c_int)`
macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            Other(c_int),
        }

        impl $name {
            pub fn from_raw(code: c_int) -> Self {
                match code {
                    $($code => Self::$variant,)*
                    other => Self::Other(other),
                }
            }

            pub fn to_raw(self) -> c_int {
                match self {
                    $(Self::$variant => $code,)*
                    Self::Other(code) => code,
                }
            }
        }
    };
}

coded_enum! {
    /// Network error code; 0 is success, negative values are failures
    ErrorCode {
        None = ERR_NONE,
        Failed = ERR_FAILED,
        Aborted = ERR_ABORTED,
        InvalidArgument = ERR_INVALID_ARGUMENT,
        InvalidHandle = ERR_INVALID_HANDLE,
        FileNotFound = ERR_FILE_NOT_FOUND,
        TimedOut = ERR_TIMED_OUT,
        FileTooBig = ERR_FILE_TOO_BIG,
        Unexpected = ERR_UNEXPECTED,
        AccessDenied = ERR_ACCESS_DENIED,
        NotImplemented = ERR_NOT_IMPLEMENTED,
        ConnectionClosed = ERR_CONNECTION_CLOSED,
        ConnectionReset = ERR_CONNECTION_RESET,
        ConnectionRefused = ERR_CONNECTION_REFUSED,
        ConnectionAborted = ERR_CONNECTION_ABORTED,
        ConnectionFailed = ERR_CONNECTION_FAILED,
        NameNotResolved = ERR_NAME_NOT_RESOLVED,
        InternetDisconnected = ERR_INTERNET_DISCONNECTED,
        SslProtocolError = ERR_SSL_PROTOCOL_ERROR,
        AddressInvalid = ERR_ADDRESS_INVALID,
        AddressUnreachable = ERR_ADDRESS_UNREACHABLE,
        CertCommonNameInvalid = ERR_CERT_COMMON_NAME_INVALID,
        CertDateInvalid = ERR_CERT_DATE_INVALID,
        CertAuthorityInvalid = ERR_CERT_AUTHORITY_INVALID,
        CertRevoked = ERR_CERT_REVOKED,
        CertInvalid = ERR_CERT_INVALID,
        InvalidUrl = ERR_INVALID_URL,
        DisallowedUrlScheme = ERR_DISALLOWED_URL_SCHEME,
        UnknownUrlScheme = ERR_UNKNOWN_URL_SCHEME,
        TooManyRedirects = ERR_TOO_MANY_REDIRECTS,
        UnsafeRedirect = ERR_UNSAFE_REDIRECT,
        UnsafePort = ERR_UNSAFE_PORT,
        InvalidResponse = ERR_INVALID_RESPONSE,
        EmptyResponse = ERR_EMPTY_RESPONSE,
        CacheMiss = ERR_CACHE_MISS,
        InsecureResponse = ERR_INSECURE_RESPONSE,
    }
}

impl ErrorCode {
    /// Whether this is one of the certificate errors
    pub fn is_certificate_error(self) -> bool {
        (ERR_CERT_INVALID..=ERR_CERT_COMMON_NAME_INVALID).contains(&self.to_raw())
    }
}

coded_enum! {
    ResourceType {
        MainFrame = RT_MAIN_FRAME,
        SubFrame = RT_SUB_FRAME,
        Stylesheet = RT_STYLESHEET,
        Script = RT_SCRIPT,
        Image = RT_IMAGE,
        FontResource = RT_FONT_RESOURCE,
        SubResource = RT_SUB_RESOURCE,
        Object = RT_OBJECT,
        Media = RT_MEDIA,
        Worker = RT_WORKER,
        SharedWorker = RT_SHARED_WORKER,
        Prefetch = RT_PREFETCH,
        Favicon = RT_FAVICON,
        Xhr = RT_XHR,
        Ping = RT_PING,
        ServiceWorker = RT_SERVICE_WORKER,
        CspReport = RT_CSP_REPORT,
        PluginResource = RT_PLUGIN_RESOURCE,
    }
}

coded_enum! {
    ContextMenuMediaType {
        None = CM_MEDIATYPE_NONE,
        Image = CM_MEDIATYPE_IMAGE,
        Video = CM_MEDIATYPE_VIDEO,
        Audio = CM_MEDIATYPE_AUDIO,
        File = CM_MEDIATYPE_FILE,
        Plugin = CM_MEDIATYPE_PLUGIN,
    }
}

coded_enum! {
    DomDocumentType {
        Unknown = DOM_DOCUMENT_TYPE_UNKNOWN,
        Html = DOM_DOCUMENT_TYPE_HTML,
        Xhtml = DOM_DOCUMENT_TYPE_XHTML,
        Plugin = DOM_DOCUMENT_TYPE_PLUGIN,
    }
}

coded_enum! {
    DomNodeType {
        Unsupported = DOM_NODE_TYPE_UNSUPPORTED,
        Element = DOM_NODE_TYPE_ELEMENT,
        Attribute = DOM_NODE_TYPE_ATTRIBUTE,
        Text = DOM_NODE_TYPE_TEXT,
        CdataSection = DOM_NODE_TYPE_CDATA_SECTION,
        ProcessingInstructions = DOM_NODE_TYPE_PROCESSING_INSTRUCTIONS,
        Comment = DOM_NODE_TYPE_COMMENT,
        Document = DOM_NODE_TYPE_DOCUMENT,
        DocumentType = DOM_NODE_TYPE_DOCUMENT_TYPE,
        DocumentFragment = DOM_NODE_TYPE_DOCUMENT_FRAGMENT,
    }
}

/// Where a navigation came from (the low byte of a transition type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionSource {
    Link,
    Explicit,
    AutoSubframe,
    ManualSubframe,
    FormSubmit,
    Reload,
    Other(u8),
}

impl TransitionSource {
    fn from_raw(code: c_uint) -> Self {
        match code & TT_SOURCE_MASK {
            TT_LINK => Self::Link,
            TT_EXPLICIT => Self::Explicit,
            TT_AUTO_SUBFRAME => Self::AutoSubframe,
            TT_MANUAL_SUBFRAME => Self::ManualSubframe,
            TT_FORM_SUBMIT => Self::FormSubmit,
            TT_RELOAD => Self::Reload,
            other => Self::Other(other as u8),
        }
    }

    fn to_raw(self) -> c_uint {
        match self {
            Self::Link => TT_LINK,
            Self::Explicit => TT_EXPLICIT,
            Self::AutoSubframe => TT_AUTO_SUBFRAME,
            Self::ManualSubframe => TT_MANUAL_SUBFRAME,
            Self::FormSubmit => TT_FORM_SUBMIT,
            Self::Reload => TT_RELOAD,
            Self::Other(code) => c_uint::from(code),
        }
    }
}

bitflags! {
    /// Qualifier bits of a transition type
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TransitionQualifiers: c_uint {
        const BLOCKED = TT_BLOCKED_FLAG;
        const FORWARD_BACK = TT_FORWARD_BACK_FLAG;
        const CHAIN_START = TT_CHAIN_START_FLAG;
        const CHAIN_END = TT_CHAIN_END_FLAG;
        const CLIENT_REDIRECT = TT_CLIENT_REDIRECT_FLAG;
        const SERVER_REDIRECT = TT_SERVER_REDIRECT_FLAG;
    }
}

/// Navigation transition: a source plus qualifier bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionType {
    pub source: TransitionSource,
    pub qualifiers: TransitionQualifiers,
}

impl TransitionType {
    pub fn from_raw(code: cef_transition_type_t) -> Self {
        Self {
            source: TransitionSource::from_raw(code),
            qualifiers: TransitionQualifiers::from_bits_retain(code & TT_QUALIFIER_MASK),
        }
    }

    pub fn to_raw(self) -> cef_transition_type_t {
        self.source.to_raw() | self.qualifiers.bits()
    }

    pub fn is_redirect(self) -> bool {
        self.qualifiers
            .intersects(TransitionQualifiers::CLIENT_REDIRECT | TransitionQualifiers::SERVER_REDIRECT)
    }
}

bitflags! {
    /// Request loading flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UrlRequestFlags: c_int {
        const SKIP_CACHE = UR_FLAG_SKIP_CACHE;
        const ONLY_FROM_CACHE = UR_FLAG_ONLY_FROM_CACHE;
        const ALLOW_CACHED_CREDENTIALS = UR_FLAG_ALLOW_CACHED_CREDENTIALS;
        const REPORT_UPLOAD_PROGRESS = UR_FLAG_REPORT_UPLOAD_PROGRESS;
        const NO_DOWNLOAD_DATA = UR_FLAG_NO_DOWNLOAD_DATA;
        const NO_RETRY_ON_5XX = UR_FLAG_NO_RETRY_ON_5XX;
        const STOP_ON_REDIRECT = UR_FLAG_STOP_ON_REDIRECT;
    }
}

bitflags! {
    /// What a context menu was opened on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextMenuTypeFlags: c_int {
        const PAGE = CM_TYPEFLAG_PAGE;
        const FRAME = CM_TYPEFLAG_FRAME;
        const LINK = CM_TYPEFLAG_LINK;
        const MEDIA = CM_TYPEFLAG_MEDIA;
        const SELECTION = CM_TYPEFLAG_SELECTION;
        const EDITABLE = CM_TYPEFLAG_EDITABLE;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextMenuMediaStateFlags: c_int {
        const ERROR = CM_MEDIAFLAG_ERROR;
        const PAUSED = CM_MEDIAFLAG_PAUSED;
        const MUTED = CM_MEDIAFLAG_MUTED;
        const LOOP = CM_MEDIAFLAG_LOOP;
        const CAN_SAVE = CM_MEDIAFLAG_CAN_SAVE;
        const HAS_AUDIO = CM_MEDIAFLAG_HAS_AUDIO;
        const HAS_VIDEO = CM_MEDIAFLAG_HAS_VIDEO;
        const CONTROL_ROOT_ELEMENT = CM_MEDIAFLAG_CONTROL_ROOT_ELEMENT;
        const CAN_PRINT = CM_MEDIAFLAG_CAN_PRINT;
        const CAN_ROTATE = CM_MEDIAFLAG_CAN_ROTATE;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextMenuEditStateFlags: c_int {
        const CAN_UNDO = CM_EDITFLAG_CAN_UNDO;
        const CAN_REDO = CM_EDITFLAG_CAN_REDO;
        const CAN_CUT = CM_EDITFLAG_CAN_CUT;
        const CAN_COPY = CM_EDITFLAG_CAN_COPY;
        const CAN_PASTE = CM_EDITFLAG_CAN_PASTE;
        const CAN_DELETE = CM_EDITFLAG_CAN_DELETE;
        const CAN_SELECT_ALL = CM_EDITFLAG_CAN_SELECT_ALL;
        const CAN_TRANSLATE = CM_EDITFLAG_CAN_TRANSLATE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_return_value_defaults_to_continue() {
        assert_eq!(ReturnValue::default(), ReturnValue::Continue);
        assert_eq!(ReturnValue::default().to_raw(), RV_CONTINUE);
    }

    #[rstest]
    #[case(ReturnValue::Cancel, 0)]
    #[case(ReturnValue::Continue, 1)]
    #[case(ReturnValue::ContinueAsync, 2)]
    fn test_return_value_codes(#[case] value: ReturnValue, #[case] code: c_int) {
        assert_eq!(value.to_raw(), code);
    }

    #[rstest]
    #[case(-105, ErrorCode::NameNotResolved)]
    #[case(0, ErrorCode::None)]
    #[case(-3, ErrorCode::Aborted)]
    #[case(-12345, ErrorCode::Other(-12345))]
    fn test_error_code_from_raw(#[case] code: c_int, #[case] expected: ErrorCode) {
        let parsed = ErrorCode::from_raw(code);
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_raw(), code);
    }

    #[test]
    fn test_certificate_errors() {
        assert!(ErrorCode::CertRevoked.is_certificate_error());
        assert!(ErrorCode::CertCommonNameInvalid.is_certificate_error());
        assert!(!ErrorCode::Failed.is_certificate_error());
    }

    #[test]
    fn test_transition_type_splits_source_and_qualifiers() {
        let raw = TT_LINK | TT_SERVER_REDIRECT_FLAG | TT_CHAIN_END_FLAG;
        let transition = TransitionType::from_raw(raw);
        assert_eq!(transition.source, TransitionSource::Link);
        assert!(transition.is_redirect());
        assert!(transition.qualifiers.contains(TransitionQualifiers::CHAIN_END));
        assert_eq!(transition.to_raw(), raw);
    }

    #[test]
    fn test_transition_keeps_unknown_bits() {
        let raw = 0x42 | 0x0001_0000;
        let transition = TransitionType::from_raw(raw);
        assert_eq!(transition.source, TransitionSource::Other(0x42));
        assert_eq!(transition.to_raw(), raw);
    }

    #[test]
    fn test_disposition_unknown_code() {
        assert_eq!(
            WindowOpenDisposition::from_raw(99),
            WindowOpenDisposition::Unknown
        );
        assert_eq!(WindowOpenDisposition::NewPopup.to_raw(), WOD_NEW_POPUP);
    }

    #[test]
    fn test_flags_retain_unknown_bits() {
        let flags = UrlRequestFlags::from_bits_retain(UR_FLAG_SKIP_CACHE | (1 << 20));
        assert!(flags.contains(UrlRequestFlags::SKIP_CACHE));
        assert_eq!(flags.bits(), UR_FLAG_SKIP_CACHE | (1 << 20));
    }

    #[test]
    fn test_termination_status_other() {
        assert_eq!(TerminationStatus::from_raw(2), TerminationStatus::ProcessCrashed);
        assert_eq!(TerminationStatus::from_raw(7).to_raw(), 7);
    }
}
