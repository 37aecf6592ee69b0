//! Context menu parameters

use crate::collections::fill_list;
use crate::fake::{base, string_slot, value_slot, Fake, FakeHandle};
use cef_sys::*;
use std::os::raw::c_int;

pub type FakeContextMenuParams = FakeHandle<cef_context_menu_params_t, ContextMenuState>;

#[derive(Debug, Default)]
pub struct ContextMenuState {
    pub x: c_int,
    pub y: c_int,
    pub type_flags: cef_context_menu_type_flags_t,
    pub link_url: Option<String>,
    pub unfiltered_link_url: Option<String>,
    pub source_url: Option<String>,
    pub has_image_contents: bool,
    pub page_url: Option<String>,
    pub frame_url: Option<String>,
    pub frame_charset: Option<String>,
    pub media_type: cef_context_menu_media_type_t,
    pub media_state_flags: cef_context_menu_media_state_flags_t,
    pub selection_text: Option<String>,
    pub misspelled_word: Option<String>,
    /// `None` makes the suggestions slot report false
    pub dictionary_suggestions: Option<Vec<String>>,
    pub is_editable: bool,
    pub is_spell_check_enabled: bool,
    pub edit_state_flags: cef_context_menu_edit_state_flags_t,
}

type Params = cef_context_menu_params_t;
type State = ContextMenuState;

value_slot!(params_x, Params, State, x, c_int);
value_slot!(params_y, Params, State, y, c_int);
value_slot!(params_type_flags, Params, State, type_flags, c_int);
string_slot!(params_link_url, Params, State, link_url);
string_slot!(params_unfiltered_link_url, Params, State, unfiltered_link_url);
string_slot!(params_source_url, Params, State, source_url);
value_slot!(params_has_image_contents, Params, State, has_image_contents, c_int);
string_slot!(params_page_url, Params, State, page_url);
string_slot!(params_frame_url, Params, State, frame_url);
string_slot!(params_frame_charset, Params, State, frame_charset);
value_slot!(params_media_type, Params, State, media_type, c_int);
value_slot!(params_media_state_flags, Params, State, media_state_flags, c_int);
string_slot!(params_selection_text, Params, State, selection_text);
string_slot!(params_misspelled_word, Params, State, misspelled_word);
value_slot!(params_is_editable, Params, State, is_editable, c_int);
value_slot!(params_is_spell_check_enabled, Params, State, is_spell_check_enabled, c_int);
value_slot!(params_edit_state_flags, Params, State, edit_state_flags, c_int);

unsafe extern "C" fn params_dictionary_suggestions(
    self_: *mut Params,
    suggestions: cef_string_list_t,
) -> c_int {
    let fake = Fake::<Params, State>::from_raw(self_);
    fake.record("dictionary_suggestions");
    let state = fake.state();
    match &state.dictionary_suggestions {
        Some(words) => {
            fill_list(suggestions, words.iter().map(String::as_str));
            1
        }
        None => 0,
    }
}

impl FakeContextMenuParams {
    pub fn new(state: ContextMenuState) -> Self {
        FakeHandle::from_parts(
            cef_context_menu_params_t {
                base: base::<Params, State>(),
                get_xcoord: params_x,
                get_ycoord: params_y,
                get_type_flags: params_type_flags,
                get_link_url: params_link_url,
                get_unfiltered_link_url: params_unfiltered_link_url,
                get_source_url: params_source_url,
                has_image_contents: params_has_image_contents,
                get_page_url: params_page_url,
                get_frame_url: params_frame_url,
                get_frame_charset: params_frame_charset,
                get_media_type: params_media_type,
                get_media_state_flags: params_media_state_flags,
                get_selection_text: params_selection_text,
                get_misspelled_word: params_misspelled_word,
                get_dictionary_suggestions: params_dictionary_suggestions,
                is_editable: params_is_editable,
                is_spell_check_enabled: params_is_spell_check_enabled,
                get_edit_state_flags: params_edit_state_flags,
            },
            state,
        )
    }
}
