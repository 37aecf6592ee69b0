//! Function tables of library-owned objects
//!
//! Any slot returning an object pointer hands the caller a new reference.
//! Slots returning `cef_string_userfree_t` hand the caller a string it must
//! free. Either may be null.

use crate::impl_cef_base;
use crate::types::*;
use std::os::raw::c_int;

#[repr(C)]
pub struct cef_request_t {
    pub base: cef_base_ref_counted_t,
    pub is_read_only: unsafe extern "C" fn(self_: *mut cef_request_t) -> c_int,
    pub get_url: unsafe extern "C" fn(self_: *mut cef_request_t) -> cef_string_userfree_t,
    pub set_url: unsafe extern "C" fn(self_: *mut cef_request_t, url: *const cef_string_t),
    pub get_method: unsafe extern "C" fn(self_: *mut cef_request_t) -> cef_string_userfree_t,
    pub set_method: unsafe extern "C" fn(self_: *mut cef_request_t, method: *const cef_string_t),
    pub get_post_data: unsafe extern "C" fn(self_: *mut cef_request_t) -> *mut cef_post_data_t,
    pub set_post_data:
        unsafe extern "C" fn(self_: *mut cef_request_t, post_data: *mut cef_post_data_t),
    /// Fills a caller-allocated multimap
    pub get_header_map:
        unsafe extern "C" fn(self_: *mut cef_request_t, header_map: cef_string_multimap_t),
    pub set_header_map:
        unsafe extern "C" fn(self_: *mut cef_request_t, header_map: cef_string_multimap_t),
    /// Replaces url, method, post data and headers in one call
    pub set: unsafe extern "C" fn(
        self_: *mut cef_request_t,
        url: *const cef_string_t,
        method: *const cef_string_t,
        post_data: *mut cef_post_data_t,
        header_map: cef_string_multimap_t,
    ),
    pub get_flags: unsafe extern "C" fn(self_: *mut cef_request_t) -> c_int,
    pub set_flags: unsafe extern "C" fn(self_: *mut cef_request_t, flags: c_int),
    pub get_first_party_for_cookies:
        unsafe extern "C" fn(self_: *mut cef_request_t) -> cef_string_userfree_t,
    pub set_first_party_for_cookies:
        unsafe extern "C" fn(self_: *mut cef_request_t, url: *const cef_string_t),
    pub get_resource_type: unsafe extern "C" fn(self_: *mut cef_request_t) -> cef_resource_type_t,
    pub get_transition_type:
        unsafe extern "C" fn(self_: *mut cef_request_t) -> cef_transition_type_t,
    /// 0 when unspecified
    pub get_identifier: unsafe extern "C" fn(self_: *mut cef_request_t) -> u64,
}

#[repr(C)]
pub struct cef_post_data_t {
    pub base: cef_base_ref_counted_t,
    pub is_read_only: unsafe extern "C" fn(self_: *mut cef_post_data_t) -> c_int,
    pub get_element_count: unsafe extern "C" fn(self_: *mut cef_post_data_t) -> usize,
    pub remove_elements: unsafe extern "C" fn(self_: *mut cef_post_data_t),
}

#[repr(C)]
pub struct cef_navigation_entry_t {
    pub base: cef_base_ref_counted_t,
    pub is_valid: unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> c_int,
    pub get_url: unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> cef_string_userfree_t,
    pub get_display_url:
        unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> cef_string_userfree_t,
    pub get_original_url:
        unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> cef_string_userfree_t,
    pub get_title:
        unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> cef_string_userfree_t,
    pub get_transition_type:
        unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> cef_transition_type_t,
    pub has_post_data: unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> c_int,
    pub get_frame_name:
        unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> cef_string_userfree_t,
    pub get_completion_time: unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> cef_time_t,
    pub get_http_status_code: unsafe extern "C" fn(self_: *mut cef_navigation_entry_t) -> c_int,
}

#[repr(C)]
pub struct cef_context_menu_params_t {
    pub base: cef_base_ref_counted_t,
    pub get_xcoord: unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> c_int,
    pub get_ycoord: unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> c_int,
    pub get_type_flags: unsafe extern "C" fn(
        self_: *mut cef_context_menu_params_t,
    ) -> cef_context_menu_type_flags_t,
    pub get_link_url:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    pub get_unfiltered_link_url:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    pub get_source_url:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    pub has_image_contents: unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> c_int,
    pub get_page_url:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    pub get_frame_url:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    pub get_frame_charset:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    pub get_media_type: unsafe extern "C" fn(
        self_: *mut cef_context_menu_params_t,
    ) -> cef_context_menu_media_type_t,
    pub get_media_state_flags: unsafe extern "C" fn(
        self_: *mut cef_context_menu_params_t,
    ) -> cef_context_menu_media_state_flags_t,
    pub get_selection_text:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    pub get_misspelled_word:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> cef_string_userfree_t,
    /// Fills a caller-allocated list; returns 1 when suggestions exist
    pub get_dictionary_suggestions: unsafe extern "C" fn(
        self_: *mut cef_context_menu_params_t,
        suggestions: cef_string_list_t,
    ) -> c_int,
    pub is_editable: unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> c_int,
    pub is_spell_check_enabled:
        unsafe extern "C" fn(self_: *mut cef_context_menu_params_t) -> c_int,
    pub get_edit_state_flags: unsafe extern "C" fn(
        self_: *mut cef_context_menu_params_t,
    ) -> cef_context_menu_edit_state_flags_t,
}

#[repr(C)]
pub struct cef_domdocument_t {
    pub base: cef_base_ref_counted_t,
    pub get_type: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> cef_dom_document_type_t,
    pub get_document: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> *mut cef_domnode_t,
    pub get_body: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> *mut cef_domnode_t,
    pub get_head: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> *mut cef_domnode_t,
    pub get_title: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> cef_string_userfree_t,
    pub get_element_by_id: unsafe extern "C" fn(
        self_: *mut cef_domdocument_t,
        id: *const cef_string_t,
    ) -> *mut cef_domnode_t,
    pub get_focused_node: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> *mut cef_domnode_t,
    pub has_selection: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> c_int,
    pub get_selection_start_offset: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> c_int,
    pub get_selection_end_offset: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> c_int,
    pub get_selection_as_markup:
        unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> cef_string_userfree_t,
    pub get_selection_as_text:
        unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> cef_string_userfree_t,
    pub get_base_url: unsafe extern "C" fn(self_: *mut cef_domdocument_t) -> cef_string_userfree_t,
    pub get_complete_url: unsafe extern "C" fn(
        self_: *mut cef_domdocument_t,
        partial_url: *const cef_string_t,
    ) -> cef_string_userfree_t,
}

#[repr(C)]
pub struct cef_domnode_t {
    pub base: cef_base_ref_counted_t,
    pub get_type: unsafe extern "C" fn(self_: *mut cef_domnode_t) -> cef_dom_node_type_t,
    pub is_text: unsafe extern "C" fn(self_: *mut cef_domnode_t) -> c_int,
    pub is_element: unsafe extern "C" fn(self_: *mut cef_domnode_t) -> c_int,
    pub get_name: unsafe extern "C" fn(self_: *mut cef_domnode_t) -> cef_string_userfree_t,
    pub get_value: unsafe extern "C" fn(self_: *mut cef_domnode_t) -> cef_string_userfree_t,
}

#[repr(C)]
pub struct cef_browser_t {
    pub base: cef_base_ref_counted_t,
    pub get_identifier: unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int,
    pub is_loading: unsafe extern "C" fn(self_: *mut cef_browser_t) -> c_int,
}

#[repr(C)]
pub struct cef_frame_t {
    pub base: cef_base_ref_counted_t,
    pub get_identifier: unsafe extern "C" fn(self_: *mut cef_frame_t) -> i64,
    pub is_main: unsafe extern "C" fn(self_: *mut cef_frame_t) -> c_int,
    pub get_name: unsafe extern "C" fn(self_: *mut cef_frame_t) -> cef_string_userfree_t,
    pub get_url: unsafe extern "C" fn(self_: *mut cef_frame_t) -> cef_string_userfree_t,
}

#[repr(C)]
pub struct cef_response_t {
    pub base: cef_base_ref_counted_t,
    pub get_status: unsafe extern "C" fn(self_: *mut cef_response_t) -> c_int,
    pub get_status_text: unsafe extern "C" fn(self_: *mut cef_response_t) -> cef_string_userfree_t,
    pub get_mime_type: unsafe extern "C" fn(self_: *mut cef_response_t) -> cef_string_userfree_t,
    pub get_header_map:
        unsafe extern "C" fn(self_: *mut cef_response_t, header_map: cef_string_multimap_t),
}

#[repr(C)]
pub struct cef_request_callback_t {
    pub base: cef_base_ref_counted_t,
    pub cont: unsafe extern "C" fn(self_: *mut cef_request_callback_t, allow: c_int),
    pub cancel: unsafe extern "C" fn(self_: *mut cef_request_callback_t),
}

#[repr(C)]
pub struct cef_auth_callback_t {
    pub base: cef_base_ref_counted_t,
    pub cont: unsafe extern "C" fn(
        self_: *mut cef_auth_callback_t,
        username: *const cef_string_t,
        password: *const cef_string_t,
    ),
    pub cancel: unsafe extern "C" fn(self_: *mut cef_auth_callback_t),
}

#[repr(C)]
pub struct cef_sslinfo_t {
    pub base: cef_base_ref_counted_t,
    pub get_cert_status: unsafe extern "C" fn(self_: *mut cef_sslinfo_t) -> c_int,
}

#[repr(C)]
pub struct cef_web_plugin_info_t {
    pub base: cef_base_ref_counted_t,
    pub get_name: unsafe extern "C" fn(self_: *mut cef_web_plugin_info_t) -> cef_string_userfree_t,
    pub get_path: unsafe extern "C" fn(self_: *mut cef_web_plugin_info_t) -> cef_string_userfree_t,
    pub get_version:
        unsafe extern "C" fn(self_: *mut cef_web_plugin_info_t) -> cef_string_userfree_t,
    pub get_description:
        unsafe extern "C" fn(self_: *mut cef_web_plugin_info_t) -> cef_string_userfree_t,
}

#[repr(C)]
pub struct cef_print_settings_t {
    pub base: cef_base_ref_counted_t,
    pub is_valid: unsafe extern "C" fn(self_: *mut cef_print_settings_t) -> c_int,
    pub is_read_only: unsafe extern "C" fn(self_: *mut cef_print_settings_t) -> c_int,
    pub set_orientation: unsafe extern "C" fn(self_: *mut cef_print_settings_t, landscape: c_int),
    pub is_landscape: unsafe extern "C" fn(self_: *mut cef_print_settings_t) -> c_int,
    pub set_device_name:
        unsafe extern "C" fn(self_: *mut cef_print_settings_t, name: *const cef_string_t),
    pub get_device_name:
        unsafe extern "C" fn(self_: *mut cef_print_settings_t) -> cef_string_userfree_t,
    pub set_copies: unsafe extern "C" fn(self_: *mut cef_print_settings_t, copies: c_int),
    pub get_copies: unsafe extern "C" fn(self_: *mut cef_print_settings_t) -> c_int,
}

#[repr(C)]
pub struct cef_print_dialog_callback_t {
    pub base: cef_base_ref_counted_t,
    pub cont: unsafe extern "C" fn(
        self_: *mut cef_print_dialog_callback_t,
        settings: *mut cef_print_settings_t,
    ),
    pub cancel: unsafe extern "C" fn(self_: *mut cef_print_dialog_callback_t),
}

#[repr(C)]
pub struct cef_print_job_callback_t {
    pub base: cef_base_ref_counted_t,
    pub cont: unsafe extern "C" fn(self_: *mut cef_print_job_callback_t),
}

#[repr(C)]
pub struct cef_resource_handler_t {
    pub base: cef_base_ref_counted_t,
    pub cancel: unsafe extern "C" fn(self_: *mut cef_resource_handler_t),
}

impl_cef_base!(
    cef_request_t,
    cef_post_data_t,
    cef_navigation_entry_t,
    cef_context_menu_params_t,
    cef_domdocument_t,
    cef_domnode_t,
    cef_browser_t,
    cef_frame_t,
    cef_response_t,
    cef_request_callback_t,
    cef_auth_callback_t,
    cef_sslinfo_t,
    cef_web_plugin_info_t,
    cef_print_settings_t,
    cef_print_dialog_callback_t,
    cef_print_job_callback_t,
    cef_resource_handler_t,
);
