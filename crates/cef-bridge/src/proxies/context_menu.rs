use crate::error::BridgeResult;
use crate::list::StringList;
use crate::proxy::proxy_type;
use crate::types::{
    ContextMenuEditStateFlags, ContextMenuMediaStateFlags, ContextMenuMediaType,
    ContextMenuTypeFlags,
};
use cef_sys::cef_context_menu_params_t;
use url::Url;

proxy_type!(
    /// What was under the pointer when a context menu opened
    ContextMenuParams,
    cef_context_menu_params_t
);

impl ContextMenuParams {
    /// X coordinate relative to the browser view
    pub fn x(&self) -> i32 {
        self.0.value(self.0.table().get_xcoord)
    }

    /// Y coordinate relative to the browser view
    pub fn y(&self) -> i32 {
        self.0.value(self.0.table().get_ycoord)
    }

    pub fn type_flags(&self) -> ContextMenuTypeFlags {
        ContextMenuTypeFlags::from_bits_retain(self.0.value(self.0.table().get_type_flags))
    }

    pub fn link_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_link_url)
    }

    /// Link URL before any security filtering
    pub fn unfiltered_link_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_unfiltered_link_url)
    }

    /// Source URL of the image, video or plugin element
    pub fn source_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_source_url)
    }

    pub fn has_image_contents(&self) -> bool {
        self.0.flag(self.0.table().has_image_contents)
    }

    pub fn page_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_page_url)
    }

    pub fn frame_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_frame_url)
    }

    pub fn frame_charset(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_frame_charset)
    }

    pub fn media_type(&self) -> ContextMenuMediaType {
        ContextMenuMediaType::from_raw(self.0.value(self.0.table().get_media_type))
    }

    pub fn media_state_flags(&self) -> ContextMenuMediaStateFlags {
        ContextMenuMediaStateFlags::from_bits_retain(
            self.0.value(self.0.table().get_media_state_flags),
        )
    }

    pub fn selection_text(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_selection_text)
    }

    pub fn misspelled_word(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_misspelled_word)
    }

    /// Spelling suggestions for the misspelled word; `None` when the library
    /// has none to offer
    pub fn dictionary_suggestions(&self) -> BridgeResult<Option<Vec<String>>> {
        let list = StringList::new(self.0.api())?;
        let found = unsafe {
            (self.0.table().get_dictionary_suggestions)(self.0.as_raw(), list.as_raw())
        };
        if found == 0 {
            return Ok(None);
        }
        list.to_vec().map(Some)
    }

    pub fn is_editable(&self) -> bool {
        self.0.flag(self.0.table().is_editable)
    }

    pub fn is_spell_check_enabled(&self) -> bool {
        self.0.flag(self.0.table().is_spell_check_enabled)
    }

    pub fn edit_state_flags(&self) -> ContextMenuEditStateFlags {
        ContextMenuEditStateFlags::from_bits_retain(
            self.0.value(self.0.table().get_edit_state_flags),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use cef_sys::{CM_EDITFLAG_CAN_COPY, CM_MEDIATYPE_IMAGE, CM_TYPEFLAG_LINK, CM_TYPEFLAG_PAGE};
    use cef_testkit::{ContextMenuState, FakeContextMenuParams, LeakCheck};
    use pretty_assertions::assert_eq;

    fn params(state: ContextMenuState) -> (FakeContextMenuParams, ContextMenuParams) {
        let fake = FakeContextMenuParams::new(state);
        let params = unsafe { ContextMenuParams::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        (fake, params)
    }

    #[test]
    fn test_link_menu() {
        let (_fake, params) = params(ContextMenuState {
            x: 10,
            y: 20,
            type_flags: CM_TYPEFLAG_PAGE | CM_TYPEFLAG_LINK,
            link_url: Some("https://example.com/next".to_string()),
            page_url: Some("https://example.com/".to_string()),
            media_type: CM_MEDIATYPE_IMAGE,
            edit_state_flags: CM_EDITFLAG_CAN_COPY,
            ..Default::default()
        });
        assert_eq!((params.x(), params.y()), (10, 20));
        assert_eq!(
            params.type_flags(),
            ContextMenuTypeFlags::PAGE | ContextMenuTypeFlags::LINK
        );
        assert_eq!(params.link_url().unwrap().unwrap().path(), "/next");
        assert_eq!(params.source_url().unwrap(), None);
        assert_eq!(params.media_type(), ContextMenuMediaType::Image);
        assert_eq!(params.edit_state_flags(), ContextMenuEditStateFlags::CAN_COPY);
        assert!(params.media_state_flags().is_empty());
    }

    #[test]
    fn test_dictionary_suggestions() {
        let check = LeakCheck::new();
        {
            let (fake, params) = params(ContextMenuState {
                misspelled_word: Some("teh".to_string()),
                dictionary_suggestions: Some(vec!["the".to_string(), "ten".to_string()]),
                ..Default::default()
            });
            assert_eq!(params.misspelled_word().unwrap().as_deref(), Some("teh"));
            assert_eq!(
                params.dictionary_suggestions().unwrap(),
                Some(vec!["the".to_string(), "ten".to_string()])
            );

            fake.state().dictionary_suggestions = None;
            assert_eq!(params.dictionary_suggestions().unwrap(), None);
        }
        check.assert_clean();
    }

    #[test]
    fn test_malformed_frame_url_fails() {
        let (_fake, params) = params(ContextMenuState {
            frame_url: Some(String::new()),
            ..Default::default()
        });
        assert!(matches!(params.frame_url(), Err(BridgeError::MalformedUrl(_))));
    }
}
