// Superficie en memoria para los tests del render

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::dom::{Node, Region, Surface};
use crate::error::KioskError;

#[derive(Debug, Default)]
pub struct FakeNodeState {
    pub classes: BTreeSet<String>,
    pub text: String,
    pub blocks: Vec<String>,
    pub open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeNode(pub Rc<RefCell<FakeNodeState>>);

impl FakeNode {
    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    pub fn is_visible(&self) -> bool {
        !self.has_class("invisible")
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn blocks(&self) -> Vec<String> {
        self.0.borrow().blocks.clone()
    }

    pub fn is_open(&self) -> bool {
        self.0.borrow().open
    }

    pub fn severity_classes(&self) -> Vec<String> {
        self.0
            .borrow()
            .classes
            .iter()
            .filter(|c| c.starts_with("severity-"))
            .cloned()
            .collect()
    }
}

impl Node for FakeNode {
    fn add_class(&self, class: &str) -> Result<(), KioskError> {
        self.0.borrow_mut().classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<(), KioskError> {
        self.0.borrow_mut().classes.remove(class);
        Ok(())
    }

    fn set_text(&self, text: &str) {
        let mut state = self.0.borrow_mut();
        state.text = text.to_string();
        state.blocks.clear();
    }

    fn clear(&self) {
        let mut state = self.0.borrow_mut();
        state.text.clear();
        state.blocks.clear();
    }

    fn append_text_block(&self, text: &str) -> Result<(), KioskError> {
        self.0.borrow_mut().blocks.push(text.to_string());
        Ok(())
    }

    fn set_open(&self, open: bool) -> Result<(), KioskError> {
        self.0.borrow_mut().open = open;
        Ok(())
    }
}

/// Todas las regiones existen salvo las indicadas en `missing`
#[derive(Debug, Default)]
pub struct FakeSurface {
    nodes: RefCell<HashMap<Region, FakeNode>>,
    missing: BTreeSet<Region>,
}

impl FakeSurface {
    pub fn without(regions: &[Region]) -> Self {
        Self {
            nodes: RefCell::default(),
            missing: regions.iter().copied().collect(),
        }
    }

    pub fn get(&self, region: Region) -> FakeNode {
        self.nodes.borrow_mut().entry(region).or_default().clone()
    }
}

impl Surface for FakeSurface {
    type Node = FakeNode;

    fn node(&self, region: Region) -> Option<FakeNode> {
        if self.missing.contains(&region) {
            return None;
        }
        Some(self.get(region))
    }
}
