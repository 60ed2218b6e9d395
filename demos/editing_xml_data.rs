use xmledit::{output, DocumentTree, Error};

fn main() -> Result<(), Error> {
    let mut tree = DocumentTree::parse(
        "<Ships><Ship><Name>Dart</Name><Speed>10</Speed><Armor>4</Armor></Ship></Ships>",
    )?;

    let ship = tree.find_mut("Name", "Dart").expect("no ship named Dart");
    ship.set_value("Arrow");

    let ships = tree.document_element_mut().expect("no document element");
    let ship = ships.child_mut("Ship").expect("no ship");
    ship.scale_child_by("Speed", 1.5)?;
    ship.adjust_child_to_sibling_by("Armor", "Speed", 2.0)?;

    let mut out = std::io::stdout();
    tree.serialize_xml(
        output::Parameters {
            indentation: Some(Default::default()),
        },
        &mut out,
    )?;
    Ok(())
}
