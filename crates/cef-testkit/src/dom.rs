//! DOM documents and nodes

use crate::fake::{base, object_slot, string_slot, value_slot, Fake, FakeHandle};
use crate::strings::{read_string, userfree_opt};
use cef_sys::*;
use std::collections::BTreeMap;
use std::os::raw::c_int;

pub type FakeDomDocument = FakeHandle<cef_domdocument_t, DomDocumentState>;
pub type FakeDomNode = FakeHandle<cef_domnode_t, DomNodeState>;

#[derive(Debug, Default)]
pub struct DomNodeState {
    pub node_type: cef_dom_node_type_t,
    pub name: Option<String>,
    pub value: Option<String>,
}

unsafe extern "C" fn node_is_text(self_: *mut cef_domnode_t) -> c_int {
    let fake = Fake::<cef_domnode_t, DomNodeState>::from_raw(self_);
    fake.record("is_text");
    c_int::from(fake.state().node_type == DOM_NODE_TYPE_TEXT)
}

unsafe extern "C" fn node_is_element(self_: *mut cef_domnode_t) -> c_int {
    let fake = Fake::<cef_domnode_t, DomNodeState>::from_raw(self_);
    fake.record("is_element");
    c_int::from(fake.state().node_type == DOM_NODE_TYPE_ELEMENT)
}

value_slot!(node_type, cef_domnode_t, DomNodeState, node_type, c_int);
string_slot!(node_name, cef_domnode_t, DomNodeState, name);
string_slot!(node_value, cef_domnode_t, DomNodeState, value);

impl FakeDomNode {
    pub fn new(state: DomNodeState) -> Self {
        FakeHandle::from_parts(
            cef_domnode_t {
                base: base::<cef_domnode_t, DomNodeState>(),
                get_type: node_type,
                is_text: node_is_text,
                is_element: node_is_element,
                get_name: node_name,
                get_value: node_value,
            },
            state,
        )
    }

    /// An element node named `name`
    pub fn element(name: &str) -> Self {
        Self::new(DomNodeState {
            node_type: DOM_NODE_TYPE_ELEMENT,
            name: Some(name.to_string()),
            value: None,
        })
    }
}

#[derive(Debug, Default)]
pub struct DomDocumentState {
    pub document_type: cef_dom_document_type_t,
    pub document: Option<FakeDomNode>,
    pub body: Option<FakeDomNode>,
    pub head: Option<FakeDomNode>,
    pub title: Option<String>,
    pub elements_by_id: BTreeMap<String, FakeDomNode>,
    pub focused_node: Option<FakeDomNode>,
    pub has_selection: bool,
    pub selection_start_offset: c_int,
    pub selection_end_offset: c_int,
    pub selection_as_markup: Option<String>,
    pub selection_as_text: Option<String>,
    pub base_url: Option<String>,
}

type Doc = cef_domdocument_t;
type DocState = DomDocumentState;

value_slot!(doc_type, Doc, DocState, document_type, c_int);
object_slot!(doc_document, Doc, DocState, document, cef_domnode_t);
object_slot!(doc_body, Doc, DocState, body, cef_domnode_t);
object_slot!(doc_head, Doc, DocState, head, cef_domnode_t);
string_slot!(doc_title, Doc, DocState, title);
object_slot!(doc_focused_node, Doc, DocState, focused_node, cef_domnode_t);
value_slot!(doc_has_selection, Doc, DocState, has_selection, c_int);
value_slot!(doc_selection_start, Doc, DocState, selection_start_offset, c_int);
value_slot!(doc_selection_end, Doc, DocState, selection_end_offset, c_int);
string_slot!(doc_selection_markup, Doc, DocState, selection_as_markup);
string_slot!(doc_selection_text, Doc, DocState, selection_as_text);
string_slot!(doc_base_url, Doc, DocState, base_url);

unsafe extern "C" fn doc_element_by_id(
    self_: *mut Doc,
    id: *const cef_string_t,
) -> *mut cef_domnode_t {
    let fake = Fake::<Doc, DocState>::from_raw(self_);
    fake.record("element_by_id");
    let Some(id) = read_string(id) else {
        return std::ptr::null_mut();
    };
    let state = fake.state();
    state
        .elements_by_id
        .get(&id)
        .map_or(std::ptr::null_mut(), |node| node.new_ref())
}

/// Joins `partial_url` onto the base URL; null without a base
unsafe extern "C" fn doc_complete_url(
    self_: *mut Doc,
    partial_url: *const cef_string_t,
) -> cef_string_userfree_t {
    let fake = Fake::<Doc, DocState>::from_raw(self_);
    fake.record("complete_url");
    let partial = read_string(partial_url).unwrap_or_default();
    let state = fake.state();
    let joined = state.base_url.as_ref().map(|base| {
        if partial.contains("://") {
            partial.clone()
        } else {
            format!("{}{}", base.trim_end_matches('/'), ensure_leading_slash(&partial))
        }
    });
    userfree_opt(joined.as_deref())
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

impl FakeDomDocument {
    pub fn new(state: DomDocumentState) -> Self {
        FakeHandle::from_parts(
            cef_domdocument_t {
                base: base::<Doc, DocState>(),
                get_type: doc_type,
                get_document: doc_document,
                get_body: doc_body,
                get_head: doc_head,
                get_title: doc_title,
                get_element_by_id: doc_element_by_id,
                get_focused_node: doc_focused_node,
                has_selection: doc_has_selection,
                get_selection_start_offset: doc_selection_start,
                get_selection_end_offset: doc_selection_end,
                get_selection_as_markup: doc_selection_markup,
                get_selection_as_text: doc_selection_text,
                get_base_url: doc_base_url,
                get_complete_url: doc_complete_url,
            },
            state,
        )
    }
}
