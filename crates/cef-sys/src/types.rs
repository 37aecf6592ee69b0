//! Strings, collections, the ref-counted base and enum codes
//!
//! String ownership follows the library's rules:
//! - `cef_string_t` values passed as `*const` arguments are borrowed
//! - `cef_string_userfree_t` results belong to the caller, who frees them with
//!   `cef_string_userfree_utf16_free`
//! - a `cef_string_t` with a non-null `dtor` owns its buffer; `dtor` releases it

use std::os::raw::{c_int, c_uint};

/// UTF-16 code unit
pub type char16 = u16;

/// UTF-16 string with an optional destructor for its buffer
#[repr(C)]
#[derive(Debug)]
pub struct cef_string_utf16_t {
    pub str_: *mut char16,
    pub length: usize,
    pub dtor: Option<unsafe extern "C" fn(str_: *mut char16)>,
}

pub type cef_string_t = cef_string_utf16_t;

/// Library-allocated string the caller must free
pub type cef_string_userfree_t = *mut cef_string_t;

impl cef_string_utf16_t {
    /// An empty string that owns nothing
    pub const fn empty() -> Self {
        Self {
            str_: std::ptr::null_mut(),
            length: 0,
            dtor: None,
        }
    }
}

impl Default for cef_string_utf16_t {
    fn default() -> Self {
        Self::empty()
    }
}

#[repr(C)]
pub struct _cef_string_list_t {
    _private: [u8; 0],
}

/// Opaque ordered list of strings
pub type cef_string_list_t = *mut _cef_string_list_t;

#[repr(C)]
pub struct _cef_string_multimap_t {
    _private: [u8; 0],
}

/// Opaque ordered list of key/value string pairs; keys may repeat
pub type cef_string_multimap_t = *mut _cef_string_multimap_t;

/// Header shared by every reference-counted structure
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct cef_base_ref_counted_t {
    /// Size of the enclosing structure in bytes
    pub size: usize,
    pub add_ref: unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t),
    /// Returns 1 when this call released the last reference
    pub release: unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int,
    pub has_one_ref: unsafe extern "C" fn(self_: *mut cef_base_ref_counted_t) -> c_int,
}

/// Marks a `#[repr(C)]` structure whose first field is `cef_base_ref_counted_t`.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` and start with a `base` field of type
/// `cef_base_ref_counted_t`, so a pointer to the structure is also a valid
/// pointer to its base.
pub unsafe trait CefBase {
    /// Reinterpret a structure pointer as a pointer to its base
    fn base_ptr(ptr: *mut Self) -> *mut cef_base_ref_counted_t
    where
        Self: Sized,
    {
        ptr.cast()
    }
}

/// Implements [`CefBase`] for structures that lead with a `base` field
#[macro_export]
macro_rules! impl_cef_base {
    ($($ty:ty),* $(,)?) => {
        $(unsafe impl $crate::types::CefBase for $ty {})*
    };
}

/// Calendar time in UTC
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct cef_time_t {
    pub year: c_int,
    /// 1-based
    pub month: c_int,
    /// 0 = Sunday
    pub day_of_week: c_int,
    pub day_of_month: c_int,
    pub hour: c_int,
    pub minute: c_int,
    pub second: c_int,
    pub millisecond: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct cef_rect_t {
    pub x: c_int,
    pub y: c_int,
    pub width: c_int,
    pub height: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct cef_draggable_region_t {
    pub bounds: cef_rect_t,
    pub draggable: c_int,
}

// cef_return_value_t
pub type cef_return_value_t = c_int;
pub const RV_CANCEL: cef_return_value_t = 0;
pub const RV_CONTINUE: cef_return_value_t = 1;
pub const RV_CONTINUE_ASYNC: cef_return_value_t = 2;

// cef_window_open_disposition_t
pub type cef_window_open_disposition_t = c_int;
pub const WOD_UNKNOWN: cef_window_open_disposition_t = 0;
pub const WOD_CURRENT_TAB: cef_window_open_disposition_t = 1;
pub const WOD_SINGLETON_TAB: cef_window_open_disposition_t = 2;
pub const WOD_NEW_FOREGROUND_TAB: cef_window_open_disposition_t = 3;
pub const WOD_NEW_BACKGROUND_TAB: cef_window_open_disposition_t = 4;
pub const WOD_NEW_POPUP: cef_window_open_disposition_t = 5;
pub const WOD_NEW_WINDOW: cef_window_open_disposition_t = 6;
pub const WOD_SAVE_TO_DISK: cef_window_open_disposition_t = 7;
pub const WOD_OFF_THE_RECORD: cef_window_open_disposition_t = 8;
pub const WOD_IGNORE_ACTION: cef_window_open_disposition_t = 9;

// cef_termination_status_t
pub type cef_termination_status_t = c_int;
pub const TS_ABNORMAL_TERMINATION: cef_termination_status_t = 0;
pub const TS_PROCESS_WAS_KILLED: cef_termination_status_t = 1;
pub const TS_PROCESS_CRASHED: cef_termination_status_t = 2;

// cef_errorcode_t (subset; the library may report others)
pub type cef_errorcode_t = c_int;
pub const ERR_NONE: cef_errorcode_t = 0;
pub const ERR_FAILED: cef_errorcode_t = -2;
pub const ERR_ABORTED: cef_errorcode_t = -3;
pub const ERR_INVALID_ARGUMENT: cef_errorcode_t = -4;
pub const ERR_INVALID_HANDLE: cef_errorcode_t = -5;
pub const ERR_FILE_NOT_FOUND: cef_errorcode_t = -6;
pub const ERR_TIMED_OUT: cef_errorcode_t = -7;
pub const ERR_FILE_TOO_BIG: cef_errorcode_t = -8;
pub const ERR_UNEXPECTED: cef_errorcode_t = -9;
pub const ERR_ACCESS_DENIED: cef_errorcode_t = -10;
pub const ERR_NOT_IMPLEMENTED: cef_errorcode_t = -11;
pub const ERR_CONNECTION_CLOSED: cef_errorcode_t = -100;
pub const ERR_CONNECTION_RESET: cef_errorcode_t = -101;
pub const ERR_CONNECTION_REFUSED: cef_errorcode_t = -102;
pub const ERR_CONNECTION_ABORTED: cef_errorcode_t = -103;
pub const ERR_CONNECTION_FAILED: cef_errorcode_t = -104;
pub const ERR_NAME_NOT_RESOLVED: cef_errorcode_t = -105;
pub const ERR_INTERNET_DISCONNECTED: cef_errorcode_t = -106;
pub const ERR_SSL_PROTOCOL_ERROR: cef_errorcode_t = -107;
pub const ERR_ADDRESS_INVALID: cef_errorcode_t = -108;
pub const ERR_ADDRESS_UNREACHABLE: cef_errorcode_t = -109;
pub const ERR_CERT_COMMON_NAME_INVALID: cef_errorcode_t = -200;
pub const ERR_CERT_DATE_INVALID: cef_errorcode_t = -201;
pub const ERR_CERT_AUTHORITY_INVALID: cef_errorcode_t = -202;
pub const ERR_CERT_REVOKED: cef_errorcode_t = -206;
pub const ERR_CERT_INVALID: cef_errorcode_t = -207;
pub const ERR_INVALID_URL: cef_errorcode_t = -300;
pub const ERR_DISALLOWED_URL_SCHEME: cef_errorcode_t = -301;
pub const ERR_UNKNOWN_URL_SCHEME: cef_errorcode_t = -302;
pub const ERR_TOO_MANY_REDIRECTS: cef_errorcode_t = -310;
pub const ERR_UNSAFE_REDIRECT: cef_errorcode_t = -311;
pub const ERR_UNSAFE_PORT: cef_errorcode_t = -312;
pub const ERR_INVALID_RESPONSE: cef_errorcode_t = -320;
pub const ERR_EMPTY_RESPONSE: cef_errorcode_t = -324;
pub const ERR_CACHE_MISS: cef_errorcode_t = -400;
pub const ERR_INSECURE_RESPONSE: cef_errorcode_t = -501;

// cef_transition_type_t: low byte is the source, high bits are qualifiers
pub type cef_transition_type_t = c_uint;
pub const TT_LINK: cef_transition_type_t = 0;
pub const TT_EXPLICIT: cef_transition_type_t = 1;
pub const TT_AUTO_SUBFRAME: cef_transition_type_t = 3;
pub const TT_MANUAL_SUBFRAME: cef_transition_type_t = 4;
pub const TT_FORM_SUBMIT: cef_transition_type_t = 7;
pub const TT_RELOAD: cef_transition_type_t = 8;
pub const TT_SOURCE_MASK: cef_transition_type_t = 0xFF;
pub const TT_BLOCKED_FLAG: cef_transition_type_t = 0x0080_0000;
pub const TT_FORWARD_BACK_FLAG: cef_transition_type_t = 0x0100_0000;
pub const TT_CHAIN_START_FLAG: cef_transition_type_t = 0x1000_0000;
pub const TT_CHAIN_END_FLAG: cef_transition_type_t = 0x2000_0000;
pub const TT_CLIENT_REDIRECT_FLAG: cef_transition_type_t = 0x4000_0000;
pub const TT_SERVER_REDIRECT_FLAG: cef_transition_type_t = 0x8000_0000;
pub const TT_IS_REDIRECT_MASK: cef_transition_type_t = 0xC000_0000;
pub const TT_QUALIFIER_MASK: cef_transition_type_t = 0xFFFF_FF00;

// cef_resource_type_t
pub type cef_resource_type_t = c_int;
pub const RT_MAIN_FRAME: cef_resource_type_t = 0;
pub const RT_SUB_FRAME: cef_resource_type_t = 1;
pub const RT_STYLESHEET: cef_resource_type_t = 2;
pub const RT_SCRIPT: cef_resource_type_t = 3;
pub const RT_IMAGE: cef_resource_type_t = 4;
pub const RT_FONT_RESOURCE: cef_resource_type_t = 5;
pub const RT_SUB_RESOURCE: cef_resource_type_t = 6;
pub const RT_OBJECT: cef_resource_type_t = 7;
pub const RT_MEDIA: cef_resource_type_t = 8;
pub const RT_WORKER: cef_resource_type_t = 9;
pub const RT_SHARED_WORKER: cef_resource_type_t = 10;
pub const RT_PREFETCH: cef_resource_type_t = 11;
pub const RT_FAVICON: cef_resource_type_t = 12;
pub const RT_XHR: cef_resource_type_t = 13;
pub const RT_PING: cef_resource_type_t = 14;
pub const RT_SERVICE_WORKER: cef_resource_type_t = 15;
pub const RT_CSP_REPORT: cef_resource_type_t = 16;
pub const RT_PLUGIN_RESOURCE: cef_resource_type_t = 17;

// cef_urlrequest_flags_t
pub type cef_urlrequest_flags_t = c_int;
pub const UR_FLAG_NONE: cef_urlrequest_flags_t = 0;
pub const UR_FLAG_SKIP_CACHE: cef_urlrequest_flags_t = 1 << 0;
pub const UR_FLAG_ONLY_FROM_CACHE: cef_urlrequest_flags_t = 1 << 1;
pub const UR_FLAG_ALLOW_CACHED_CREDENTIALS: cef_urlrequest_flags_t = 1 << 2;
pub const UR_FLAG_REPORT_UPLOAD_PROGRESS: cef_urlrequest_flags_t = 1 << 3;
pub const UR_FLAG_NO_DOWNLOAD_DATA: cef_urlrequest_flags_t = 1 << 4;
pub const UR_FLAG_NO_RETRY_ON_5XX: cef_urlrequest_flags_t = 1 << 5;
pub const UR_FLAG_STOP_ON_REDIRECT: cef_urlrequest_flags_t = 1 << 6;

// cef_context_menu_type_flags_t
pub type cef_context_menu_type_flags_t = c_int;
pub const CM_TYPEFLAG_NONE: cef_context_menu_type_flags_t = 0;
pub const CM_TYPEFLAG_PAGE: cef_context_menu_type_flags_t = 1 << 0;
pub const CM_TYPEFLAG_FRAME: cef_context_menu_type_flags_t = 1 << 1;
pub const CM_TYPEFLAG_LINK: cef_context_menu_type_flags_t = 1 << 2;
pub const CM_TYPEFLAG_MEDIA: cef_context_menu_type_flags_t = 1 << 3;
pub const CM_TYPEFLAG_SELECTION: cef_context_menu_type_flags_t = 1 << 4;
pub const CM_TYPEFLAG_EDITABLE: cef_context_menu_type_flags_t = 1 << 5;

// cef_context_menu_media_type_t
pub type cef_context_menu_media_type_t = c_int;
pub const CM_MEDIATYPE_NONE: cef_context_menu_media_type_t = 0;
pub const CM_MEDIATYPE_IMAGE: cef_context_menu_media_type_t = 1;
pub const CM_MEDIATYPE_VIDEO: cef_context_menu_media_type_t = 2;
pub const CM_MEDIATYPE_AUDIO: cef_context_menu_media_type_t = 3;
pub const CM_MEDIATYPE_FILE: cef_context_menu_media_type_t = 4;
pub const CM_MEDIATYPE_PLUGIN: cef_context_menu_media_type_t = 5;

// cef_context_menu_media_state_flags_t
pub type cef_context_menu_media_state_flags_t = c_int;
pub const CM_MEDIAFLAG_NONE: cef_context_menu_media_state_flags_t = 0;
pub const CM_MEDIAFLAG_ERROR: cef_context_menu_media_state_flags_t = 1 << 0;
pub const CM_MEDIAFLAG_PAUSED: cef_context_menu_media_state_flags_t = 1 << 1;
pub const CM_MEDIAFLAG_MUTED: cef_context_menu_media_state_flags_t = 1 << 2;
pub const CM_MEDIAFLAG_LOOP: cef_context_menu_media_state_flags_t = 1 << 3;
pub const CM_MEDIAFLAG_CAN_SAVE: cef_context_menu_media_state_flags_t = 1 << 4;
pub const CM_MEDIAFLAG_HAS_AUDIO: cef_context_menu_media_state_flags_t = 1 << 5;
pub const CM_MEDIAFLAG_HAS_VIDEO: cef_context_menu_media_state_flags_t = 1 << 6;
pub const CM_MEDIAFLAG_CONTROL_ROOT_ELEMENT: cef_context_menu_media_state_flags_t = 1 << 7;
pub const CM_MEDIAFLAG_CAN_PRINT: cef_context_menu_media_state_flags_t = 1 << 8;
pub const CM_MEDIAFLAG_CAN_ROTATE: cef_context_menu_media_state_flags_t = 1 << 9;

// cef_context_menu_edit_state_flags_t
pub type cef_context_menu_edit_state_flags_t = c_int;
pub const CM_EDITFLAG_NONE: cef_context_menu_edit_state_flags_t = 0;
pub const CM_EDITFLAG_CAN_UNDO: cef_context_menu_edit_state_flags_t = 1 << 0;
pub const CM_EDITFLAG_CAN_REDO: cef_context_menu_edit_state_flags_t = 1 << 1;
pub const CM_EDITFLAG_CAN_CUT: cef_context_menu_edit_state_flags_t = 1 << 2;
pub const CM_EDITFLAG_CAN_COPY: cef_context_menu_edit_state_flags_t = 1 << 3;
pub const CM_EDITFLAG_CAN_PASTE: cef_context_menu_edit_state_flags_t = 1 << 4;
pub const CM_EDITFLAG_CAN_DELETE: cef_context_menu_edit_state_flags_t = 1 << 5;
pub const CM_EDITFLAG_CAN_SELECT_ALL: cef_context_menu_edit_state_flags_t = 1 << 6;
pub const CM_EDITFLAG_CAN_TRANSLATE: cef_context_menu_edit_state_flags_t = 1 << 7;

// cef_dom_document_type_t
pub type cef_dom_document_type_t = c_int;
pub const DOM_DOCUMENT_TYPE_UNKNOWN: cef_dom_document_type_t = 0;
pub const DOM_DOCUMENT_TYPE_HTML: cef_dom_document_type_t = 1;
pub const DOM_DOCUMENT_TYPE_XHTML: cef_dom_document_type_t = 2;
pub const DOM_DOCUMENT_TYPE_PLUGIN: cef_dom_document_type_t = 3;

// cef_dom_node_type_t
pub type cef_dom_node_type_t = c_int;
pub const DOM_NODE_TYPE_UNSUPPORTED: cef_dom_node_type_t = 0;
pub const DOM_NODE_TYPE_ELEMENT: cef_dom_node_type_t = 1;
pub const DOM_NODE_TYPE_ATTRIBUTE: cef_dom_node_type_t = 2;
pub const DOM_NODE_TYPE_TEXT: cef_dom_node_type_t = 3;
pub const DOM_NODE_TYPE_CDATA_SECTION: cef_dom_node_type_t = 4;
pub const DOM_NODE_TYPE_PROCESSING_INSTRUCTIONS: cef_dom_node_type_t = 5;
pub const DOM_NODE_TYPE_COMMENT: cef_dom_node_type_t = 6;
pub const DOM_NODE_TYPE_DOCUMENT: cef_dom_node_type_t = 7;
pub const DOM_NODE_TYPE_DOCUMENT_TYPE: cef_dom_node_type_t = 8;
pub const DOM_NODE_TYPE_DOCUMENT_FRAGMENT: cef_dom_node_type_t = 9;

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    struct Leading {
        base: cef_base_ref_counted_t,
        payload: u64,
    }

    unsafe impl CefBase for Leading {}

    #[test]
    fn test_empty_string_owns_nothing() {
        let s = cef_string_t::empty();
        assert!(s.str_.is_null());
        assert_eq!(s.length, 0);
        assert!(s.dtor.is_none());
    }

    #[test]
    fn test_base_ptr_is_structure_address() {
        let ptr = 0x1000 as *mut Leading;
        assert_eq!(Leading::base_ptr(ptr) as usize, 0x1000);
    }

    #[test]
    fn test_transition_masks_partition_bits() {
        assert_eq!(TT_SOURCE_MASK & TT_QUALIFIER_MASK, 0);
        assert_eq!(TT_SOURCE_MASK | TT_QUALIFIER_MASK, u32::MAX);
        assert_eq!(
            TT_IS_REDIRECT_MASK,
            TT_CLIENT_REDIRECT_FLAG | TT_SERVER_REDIRECT_FLAG
        );
    }

    #[test]
    fn test_return_value_codes() {
        assert_eq!(RV_CANCEL, 0);
        assert_eq!(RV_CONTINUE, 1);
        assert_eq!(RV_CONTINUE_ASYNC, 2);
    }
}
