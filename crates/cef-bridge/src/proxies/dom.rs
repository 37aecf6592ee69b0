use crate::error::BridgeResult;
use crate::proxy::proxy_type;
use crate::string::CefStringBuf;
use crate::types::{DomDocumentType, DomNodeType};
use cef_sys::{cef_domdocument_t, cef_domnode_t};
use url::Url;

proxy_type!(
    /// A loaded document; only valid inside the visitor callback that
    /// produced it
    DomDocument,
    cef_domdocument_t
);

proxy_type!(DomNode, cef_domnode_t);

impl DomDocument {
    pub fn document_type(&self) -> DomDocumentType {
        DomDocumentType::from_raw(self.0.value(self.0.table().get_type))
    }

    /// Root node
    pub fn document(&self) -> Option<DomNode> {
        self.0.object(self.0.table().get_document).map(DomNode)
    }

    pub fn body(&self) -> Option<DomNode> {
        self.0.object(self.0.table().get_body).map(DomNode)
    }

    pub fn head(&self) -> Option<DomNode> {
        self.0.object(self.0.table().get_head).map(DomNode)
    }

    pub fn title(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_title)
    }

    pub fn element_by_id(&self, id: &str) -> Option<DomNode> {
        let id = CefStringBuf::new(id);
        let raw = unsafe { (self.0.table().get_element_by_id)(self.0.as_raw(), id.as_ptr()) };
        unsafe { DomNode::from_owned(self.0.api(), raw) }
    }

    pub fn focused_node(&self) -> Option<DomNode> {
        self.0.object(self.0.table().get_focused_node).map(DomNode)
    }

    pub fn has_selection(&self) -> bool {
        self.0.flag(self.0.table().has_selection)
    }

    pub fn selection_start_offset(&self) -> i32 {
        self.0.value(self.0.table().get_selection_start_offset)
    }

    pub fn selection_end_offset(&self) -> i32 {
        self.0.value(self.0.table().get_selection_end_offset)
    }

    pub fn selection_as_markup(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_selection_as_markup)
    }

    pub fn selection_as_text(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_selection_as_text)
    }

    pub fn base_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_base_url)
    }

    /// Resolve `partial` against the document's base URL
    pub fn complete_url(&self, partial: &str) -> BridgeResult<Option<Url>> {
        let partial = CefStringBuf::new(partial);
        let raw = unsafe { (self.0.table().get_complete_url)(self.0.as_raw(), partial.as_ptr()) };
        unsafe { crate::string::take_url(self.0.api(), raw) }
    }
}

impl DomNode {
    pub fn node_type(&self) -> DomNodeType {
        DomNodeType::from_raw(self.0.value(self.0.table().get_type))
    }

    pub fn is_text(&self) -> bool {
        self.0.flag(self.0.table().is_text)
    }

    pub fn is_element(&self) -> bool {
        self.0.flag(self.0.table().is_element)
    }

    pub fn name(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_name)
    }

    pub fn value(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_sys::DOM_DOCUMENT_TYPE_HTML;
    use cef_testkit::{DomDocumentState, FakeDomDocument, FakeDomNode, LeakCheck};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn document() -> FakeDomDocument {
        let mut elements_by_id = BTreeMap::new();
        elements_by_id.insert("main".to_string(), FakeDomNode::element("DIV"));
        FakeDomDocument::new(DomDocumentState {
            document_type: DOM_DOCUMENT_TYPE_HTML,
            body: Some(FakeDomNode::element("BODY")),
            title: Some("Doc".to_string()),
            elements_by_id,
            base_url: Some("https://example.com/base/".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_nodes_are_owned_references() {
        let check = LeakCheck::new();
        {
            let fake = document();
            let doc = unsafe { DomDocument::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
            assert_eq!(doc.document_type(), DomDocumentType::Html);
            assert_eq!(doc.title().unwrap().as_deref(), Some("Doc"));

            let body = doc.body().unwrap();
            assert!(body.is_element());
            assert_eq!(body.node_type(), DomNodeType::Element);
            assert_eq!(body.name().unwrap().as_deref(), Some("BODY"));
            assert!(doc.head().is_none());
            assert!(doc.focused_node().is_none());
        }
        check.assert_clean();
    }

    #[test]
    fn test_element_by_id() {
        let fake = document();
        let doc = unsafe { DomDocument::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        let node = doc.element_by_id("main").unwrap();
        assert_eq!(node.name().unwrap().as_deref(), Some("DIV"));
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn test_complete_url() {
        let fake = document();
        let doc = unsafe { DomDocument::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        assert_eq!(
            doc.complete_url("img/a.png").unwrap().unwrap().as_str(),
            "https://example.com/base/img/a.png"
        );
        fake.state().base_url = None;
        assert_eq!(doc.complete_url("img/a.png").unwrap(), None);
        assert_eq!(doc.base_url().unwrap(), None);
    }

    #[test]
    fn test_selection() {
        let fake = document();
        {
            let mut state = fake.state();
            state.has_selection = true;
            state.selection_start_offset = 2;
            state.selection_end_offset = 5;
            state.selection_as_text = Some("llo".to_string());
        }
        let doc = unsafe { DomDocument::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        assert!(doc.has_selection());
        assert_eq!(doc.selection_start_offset(), 2);
        assert_eq!(doc.selection_end_offset(), 5);
        assert_eq!(doc.selection_as_text().unwrap().as_deref(), Some("llo"));
        assert_eq!(doc.selection_as_markup().unwrap(), None);
    }
}
