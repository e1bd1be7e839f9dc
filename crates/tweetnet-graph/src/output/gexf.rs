//! GEXF 1.2 writer using quick-xml

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::graph::Graph;

const GEXF_NS: &str = "http://gexf.net/1.2";
const GEXF_VERSION: &str = "1.2";

/// Serialize `graph` as an indented GEXF document.
///
/// Node ids and labels are the screen names. Edge weights are emitted as the
/// `weight` attribute; edge ids are their insertion index.
pub fn write_gexf<W: Write>(graph: &Graph, out: W) -> Result<()> {
    let mut w = Writer::new_with_indent(out, b' ', 2);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.write_event(Event::Start(
        BytesStart::new("gexf").with_attributes([("xmlns", GEXF_NS), ("version", GEXF_VERSION)]),
    ))?;

    w.write_event(Event::Start(BytesStart::new("meta")))?;
    w.write_event(Event::Start(BytesStart::new("creator")))?;
    w.write_event(Event::Text(BytesText::new(concat!(
        "tweetnet ",
        env!("CARGO_PKG_VERSION")
    ))))?;
    w.write_event(Event::End(BytesEnd::new("creator")))?;
    w.write_event(Event::End(BytesEnd::new("meta")))?;

    w.write_event(Event::Start(BytesStart::new("graph").with_attributes([
        ("mode", "static"),
        ("defaultedgetype", graph.kind().as_str()),
    ])))?;

    w.write_event(Event::Start(BytesStart::new("nodes")))?;
    for name in graph.nodes() {
        let node = BytesStart::new("node").with_attributes([("id", name), ("label", name)]);
        w.write_event(Event::Empty(node))?;
    }
    w.write_event(Event::End(BytesEnd::new("nodes")))?;

    w.write_event(Event::Start(BytesStart::new("edges")))?;
    for (idx, edge) in graph.edges().enumerate() {
        let id = idx.to_string();
        let weight = edge.weight.to_string();
        let mut el = BytesStart::new("edge");
        el.push_attribute(("id", id.as_str()));
        el.push_attribute(("source", edge.source));
        el.push_attribute(("target", edge.target));
        el.push_attribute(("weight", weight.as_str()));
        w.write_event(Event::Empty(el))?;
    }
    w.write_event(Event::End(BytesEnd::new("edges")))?;

    w.write_event(Event::End(BytesEnd::new("graph")))?;
    w.write_event(Event::End(BytesEnd::new("gexf")))?;
    w.into_inner().flush()?;
    Ok(())
}
