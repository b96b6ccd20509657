use super::records::{self, Records};
use crate::io::{AltLocPolicy, ReadConfig, error::Error};
use crate::model::atom::{Atom, ResidueId};
use crate::model::structure::Structure;
use crate::model::types::Element;
use log::debug;
use pdbtbx::{Format, Model, PDB, ReadOptions, StrictnessLevel};
use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};

pub fn read<R: BufRead>(mut reader: R, config: &ReadConfig) -> Result<Structure, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let records = records::scan(&text)?;
    let pdb = parse(&text)?;
    let model = select_model(&pdb, &records, config.model)?;

    let mut atoms = collect_atoms(model, config);
    if atoms.is_empty() {
        return Err(Error::EmptyStructure);
    }
    for atom in &mut atoms {
        atom.secondary_structure = records.code_for(atom.residue);
    }

    let structure = Structure::from_atoms(atoms);
    debug!(
        "read {} atoms in {} residues from model {} ({} secondary-structure records)",
        structure.atom_count(),
        structure.residue_count(),
        config.model,
        records.ranges.len()
    );
    Ok(structure)
}

/// Number of models declared by the file.
///
/// The `NUMMDL` record wins when present; otherwise the models found in the
/// coordinate section are counted, and a file with none holds a single model.
pub fn count_models<R: BufRead>(mut reader: R) -> Result<usize, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let records = records::scan(&text)?;
    if let Some(declared) = records.declared_models {
        return Ok(declared);
    }
    let pdb = parse(&text)?;
    Ok(pdb.model_count().max(1))
}

fn parse(text: &str) -> Result<PDB, Error> {
    let (pdb, warnings) = ReadOptions::new()
        .set_format(Format::Pdb)
        .set_level(StrictnessLevel::Loose)
        .read_raw(BufReader::new(text.as_bytes()))
        .map_err(|errors| {
            Error::Pdb(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

    for warning in &warnings {
        debug!("PDB warning: {}", warning);
    }
    Ok(pdb)
}

/// Files without `MODEL` records hold a single model 1.
fn select_model<'a>(pdb: &'a PDB, records: &Records, serial: usize) -> Result<&'a Model, Error> {
    let model = if records.has_model_records {
        pdb.models().find(|m| m.serial_number() == serial)
    } else if serial == 1 {
        match pdb.models().next() {
            Some(model) => Some(model),
            None => return Err(Error::EmptyStructure),
        }
    } else {
        None
    };
    model.ok_or(Error::ModelNotFound(serial))
}

/// Walks chains, residues and conformers in file order.
///
/// With [`AltLocPolicy::FirstOnly`] an atom of an alternate conformer is kept
/// only when no earlier alternate conformer of the same residue named it.
fn collect_atoms(model: &Model, config: &ReadConfig) -> Vec<Atom> {
    let mut atoms = Vec::new();

    for chain in model.chains() {
        let chain_id = chain.id().chars().next().unwrap_or(' ');
        if config.chain.is_some_and(|c| c != chain_id) {
            continue;
        }

        for residue in chain.residues() {
            let id = ResidueId::new(chain_id, residue.serial_number() as i32);
            let mut alternate_names: HashSet<&str> = HashSet::new();

            for conformer in residue.conformers() {
                let alternate = conformer.alternative_location().is_some();
                let mut named_here: Vec<&str> = Vec::new();

                for atom in conformer.atoms() {
                    if alternate
                        && config.alt_locs == AltLocPolicy::FirstOnly
                        && alternate_names.contains(atom.name())
                    {
                        continue;
                    }
                    if alternate {
                        named_here.push(atom.name());
                    }

                    let symbol = atom.element().map(|e| e.symbol());
                    let (x, y, z) = atom.pos();
                    atoms.push(
                        Atom::new(resolve_element(symbol, atom.name()), atom.name(), id, [x, y, z])
                            .with_residue_name(conformer.name()),
                    );
                }
                alternate_names.extend(named_here);
            }
        }
    }

    atoms
}

/// Element reported by the reader, falling back to the first letter of the atom name.
fn resolve_element(symbol: Option<&str>, atom_name: &str) -> Element {
    let symbol = match symbol.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => atom_name
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(String::from)
            .unwrap_or_default(),
    };
    symbol.parse().unwrap_or(Element::Other)
}

#[cfg(test)]
mod tests {
    use super::super::records::tests::{helix_line, sheet_line};
    use super::*;
    use std::io::Cursor;

    fn atom_line(
        serial: u32,
        name: &str,
        alt_loc: char,
        res_name: &str,
        chain: char,
        res_seq: i32,
        coords: [f64; 3],
        element: &str,
    ) -> String {
        format!(
            concat!(
                "{:<6}{:>5} {:<4}{:1}{:<3} {:1}{:>4}    ",
                "{:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}"
            ),
            "ATOM",
            serial,
            name,
            alt_loc,
            res_name,
            chain,
            res_seq,
            coords[0],
            coords[1],
            coords[2],
            1.0,
            0.0,
            element
        )
    }

    fn read_text(text: &str, config: &ReadConfig) -> Result<Structure, Error> {
        read(Cursor::new(text.as_bytes()), config)
    }

    fn sample() -> String {
        [
            helix_line('A', 1, 2, 1),
            helix_line('A', 3, 3, 5),
            sheet_line('B', 10, 10),
            atom_line(1, "N", ' ', "ALA", 'A', 1, [0.0, 0.0, 0.0], "N"),
            atom_line(2, "CA", ' ', "ALA", 'A', 1, [1.458, 0.0, 0.0], "C"),
            atom_line(3, "O", ' ', "ALA", 'A', 2, [2.0, 1.0, 0.0], "O"),
            atom_line(4, "H", ' ', "GLY", 'A', 3, [0.0, 1.0, 0.0], "H"),
            atom_line(5, "OG", ' ', "SER", 'A', 4, [0.0, 0.0, 1.0], "O"),
            atom_line(6, "N", ' ', "GLY", 'B', 10, [5.0, 0.0, 0.0], "N"),
            "END".to_string(),
        ]
        .join("\n")
    }

    #[test]
    fn atom_fields_are_read() {
        let s = read_text(&sample(), &ReadConfig::default()).unwrap();
        assert_eq!(s.atom_count(), 6);

        let ca = s.atom(1);
        assert_eq!(ca.name, "CA");
        assert_eq!(ca.element, Element::C);
        assert_eq!(ca.residue, ResidueId::new('A', 1));
        assert_eq!(ca.residue_name, "ALA");
        assert!((ca.position[0] - 1.458).abs() < 1e-9);
    }

    #[test]
    fn missing_element_falls_back_to_atom_name() {
        assert_eq!(resolve_element(None, "1HB"), Element::H);
        assert_eq!(resolve_element(Some(" "), "CA"), Element::C);
        assert_eq!(resolve_element(Some("O"), "OG"), Element::O);
        assert_eq!(resolve_element(Some("XX"), "X1"), Element::Other);
    }

    #[test]
    fn helix_and_sheet_records_assign_codes() {
        let s = read_text(&sample(), &ReadConfig::default()).unwrap();
        let codes: Vec<_> = s.atoms().iter().map(|a| a.secondary_structure).collect();
        assert_eq!(
            codes,
            vec![Some('H'), Some('H'), Some('H'), Some('G'), None, Some('E')]
        );
    }

    #[test]
    fn default_reads_every_chain() {
        let all = read_text(&sample(), &ReadConfig::default()).unwrap();
        assert_eq!(all.chains(), vec!['A', 'B']);

        let only_a = ReadConfig {
            chain: Some('A'),
            ..ReadConfig::default()
        };
        let s = read_text(&sample(), &only_a).unwrap();
        assert_eq!(s.chains(), vec!['A']);
        assert_eq!(s.atom_count(), all.atom_count() - 1);
    }

    #[test]
    fn chain_filter_keeps_one_chain() {
        let config = ReadConfig {
            chain: Some('B'),
            ..ReadConfig::default()
        };
        let s = read_text(&sample(), &config).unwrap();
        assert_eq!(s.atom_count(), 1);
        assert_eq!(s.chains(), vec!['B']);

        let config = ReadConfig {
            chain: Some('Z'),
            ..ReadConfig::default()
        };
        assert!(matches!(
            read_text(&sample(), &config),
            Err(Error::EmptyStructure)
        ));
    }

    #[test]
    fn alternate_locations_keep_first_conformer() {
        let text = [
            atom_line(1, "N", ' ', "SER", 'A', 5, [-1.0, 0.0, 0.0], "N"),
            atom_line(2, "CB", 'A', "SER", 'A', 5, [0.0, 0.0, 0.0], "C"),
            atom_line(3, "OG", 'A', "SER", 'A', 5, [1.0, 0.0, 0.0], "O"),
            atom_line(4, "CB", 'B', "SER", 'A', 5, [0.5, 0.0, 0.0], "C"),
            atom_line(5, "OG", 'B', "SER", 'A', 5, [1.5, 0.0, 0.0], "O"),
        ]
        .join("\n");

        let s = read_text(&text, &ReadConfig::default()).unwrap();
        assert_eq!(s.atom_count(), 3);
        let cb = s.named_atom(ResidueId::new('A', 5), "CB").unwrap();
        let og = s.named_atom(ResidueId::new('A', 5), "OG").unwrap();
        assert_eq!(s.atom(cb).position[0], 0.0);
        assert_eq!(s.atom(og).position[0], 1.0);

        let config = ReadConfig {
            alt_locs: AltLocPolicy::All,
            ..ReadConfig::default()
        };
        assert_eq!(read_text(&text, &config).unwrap().atom_count(), 5);
    }

    fn two_models(nummdl: bool) -> String {
        let mut lines = Vec::new();
        if nummdl {
            lines.push("NUMMDL    2".to_string());
        }
        for (serial, x) in [(1, 0.0), (2, 9.0)] {
            lines.push(format!("MODEL     {serial:>4}"));
            lines.push(atom_line(1, "N", ' ', "ALA", 'A', 1, [x, 0.0, 0.0], "N"));
            lines.push(atom_line(2, "O", ' ', "ALA", 'A', 1, [x, 1.0, 0.0], "O"));
            lines.push("ENDMDL".to_string());
        }
        lines.push("END".to_string());
        lines.join("\n")
    }

    #[test]
    fn model_selection() {
        let first = read_text(&two_models(true), &ReadConfig::default()).unwrap();
        assert_eq!(first.atom_count(), 2);
        assert_eq!(first.atom(0).position[0], 0.0);

        let config = ReadConfig {
            model: 2,
            ..ReadConfig::default()
        };
        let second = read_text(&two_models(true), &config).unwrap();
        assert_eq!(second.atom(0).position[0], 9.0);

        let config = ReadConfig {
            model: 3,
            ..ReadConfig::default()
        };
        assert!(matches!(
            read_text(&two_models(true), &config),
            Err(Error::ModelNotFound(3))
        ));
        assert!(matches!(
            read_text(&sample(), &config),
            Err(Error::ModelNotFound(3))
        ));
    }

    #[test]
    fn counts_models_from_nummdl_or_model_records() {
        assert_eq!(count_models(Cursor::new(two_models(true))).unwrap(), 2);
        assert_eq!(count_models(Cursor::new(two_models(false))).unwrap(), 2);
        assert_eq!(count_models(Cursor::new(sample())).unwrap(), 1);
        assert!(matches!(
            count_models(Cursor::new("NUMMDL    x")),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn input_without_atoms_is_an_error() {
        let err = read_text("REMARK   1 nothing here\nEND", &ReadConfig::default()).unwrap_err();
        assert!(
            matches!(err, Error::EmptyStructure | Error::Pdb(_)),
            "{err:?}"
        );
    }
}
