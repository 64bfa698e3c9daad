use std::collections::BTreeMap;
use std::fs;

use svg::node::element::tag;
use svg::parser::{Event, Parser};
use tracing::debug;

use crate::error::{DocumentError, PathError};
use crate::parse::parse_path;
use crate::types::Path;

///A node of an SVG document: the element name, its attributes and child elements.
///Text, comments and declarations are dropped.
///
///`name` is the local part of the tag name. `space` is the namespace the tag's
///prefix (or the default `xmlns`) is bound to; an undeclared prefix is kept as is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub space: String,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
}

///Namespace bindings in scope: prefix to URI, `""` for the default namespace.
type Scope = BTreeMap<String, String>;

fn bind_namespaces(scope: &Scope, attributes: &BTreeMap<String, String>) -> Scope {
    let mut scope = scope.clone();

    for (key, uri) in attributes {
	if key == "xmlns" {
	    scope.insert(String::new(), uri.clone());
	} else if let Some(prefix) = key.strip_prefix("xmlns:") {
	    scope.insert(String::from(prefix), uri.clone());
	}
    }

    scope
}

fn resolve_name(scope: &Scope, qualified: &str) -> (String, String) {
    let (prefix, local) = match qualified.split_once(':') {
	Some((prefix, local)) => (prefix, local),
	None => ("", qualified),
    };

    let space = match scope.get(prefix) {
	Some(uri) => uri.clone(),
	None => String::from(prefix),
    };

    (space, String::from(local))
}

fn parse_node<'l, I>(events: &mut I, scope: &Scope, depth: usize) -> Result<Vec<Element>, DocumentError>
where I: Iterator<Item = Event<'l>>
{
    let mut siblings = Vec::new();

    while let Some(event) = events.next() {
	let (name, kind, attributes) = match event {
	    Event::Tag(name, kind, attributes) => (name, kind, attributes),
	    Event::Error(err) => return Err(DocumentError::Markup(format!("{:?}", err))),
	    _ => continue,
	};

	if kind == tag::Type::End {
	    if depth == 0 {
		return Err(DocumentError::Markup(format!("unmatched end tag </{}>", name)));
	    }
	    return Ok(siblings);
	}

	let attributes: BTreeMap<String, String> = attributes.iter()
	    .map(|(k, v)| (k.clone(), v.to_string()))
	    .collect();
	let scope = bind_namespaces(scope, &attributes);
	let (space, name) = resolve_name(&scope, name);

	let mut node = Element {
	    space,
	    name,
	    attributes,
	    children: Vec::new(),
	};

	if kind == tag::Type::Start {
	    node.children = parse_node(events, &scope, depth + 1)?;
	}

	siblings.push(node);
    }

    Ok(siblings)
}

impl Element {
    ///Builds the tree of the first top-level element in `content`.
    ///An empty document gives an empty element.
    pub fn read(content: &str) -> Result<Element, DocumentError> {
	let mut events = Parser::new(content);
	let mut roots = parse_node(&mut events, &Scope::new(), 0)?;
	debug!(roots = roots.len(), "read svg document");

	if roots.is_empty() {
	    return Ok(Element::default());
	}

	Ok(roots.remove(0))
    }

    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Element, DocumentError> {
	let content = fs::read_to_string(path)?;
	Element::read(&content)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
	self.attributes.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
	self.attribute("id")
    }

    ///Finds the first descendant whose `id` attribute is `id`, depth first.
    pub fn find_id(&self, id: &str) -> Option<&Element> {
	for child in &self.children {
	    if child.id() == Some(id) {
		return Some(child);
	    }
	    if let Some(element) = child.find_id(id) {
		return Some(element);
	    }
	}

	None
    }

    ///Collects all descendants whose local name is `name`, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
	let mut elements = Vec::new();
	self.collect(&|it: &Element| it.name == name, &mut elements);
	elements
    }

    ///Collects all descendants in namespace `space` with local name `name`,
    ///in document order.
    pub fn find_all_in(&self, space: &str, name: &str) -> Vec<&Element> {
	let mut elements = Vec::new();
	self.collect(&|it: &Element| it.space == space && it.name == name, &mut elements);
	elements
    }

    fn collect<'a>(&'a self, matches: &dyn Fn(&Element) -> bool, into: &mut Vec<&'a Element>) {
	for child in &self.children {
	    if matches(child) {
		into.push(child);
	    }
	    child.collect(matches, into);
	}
    }

    ///Parses the `d` attribute, if there is one.
    pub fn path_data(&self) -> Option<Result<Path, PathError>> {
	self.attribute("d").map(parse_path)
    }

    ///Like [`Element::path_data`], with the error naming the element.
    pub fn parse_path(&self) -> Result<Option<Path>, DocumentError> {
	match self.path_data() {
	    None => Ok(None),
	    Some(Ok(path)) => Ok(Some(path)),
	    Some(Err(source)) => Err(DocumentError::Path {
		element: self.id().unwrap_or(&self.name).to_string(),
		source,
	    }),
	}
    }
}
