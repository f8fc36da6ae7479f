//! A byte-level round trip built on ordinal dispatch: each element is written
//! as its ordinal followed by the raw bytes of the active alternative, and read
//! back by constructing that ordinal and refilling it in place.

use std::io::{self, Read, Write};

use ordsum::{OrdinalError, Sum, Visit, VisitMut, Visitor};
use thiserror::Error;

type Element = Sum![usize, char];

#[derive(Debug, Error)]
enum DecodeError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Ordinal(#[from] OrdinalError),
}

struct Dump<W>(W);

impl<W: Write> Visitor for Dump<W> {
    type Output = io::Result<()>;
}

impl<W: Write> Visit<usize> for Dump<W> {
    fn visit(&mut self, value: &usize) -> io::Result<()> {
        self.0.write_all(&value.to_le_bytes())
    }
}

impl<W: Write> Visit<char> for Dump<W> {
    fn visit(&mut self, value: &char) -> io::Result<()> {
        self.0.write_all(&u32::from(*value).to_le_bytes())
    }
}

struct Refill<R>(R);

impl<R: Read> Visitor for Refill<R> {
    type Output = io::Result<()>;
}

impl<R: Read> VisitMut<usize> for Refill<R> {
    fn visit_mut(&mut self, value: &mut usize) -> io::Result<()> {
        let mut bytes = [0; size_of::<usize>()];
        self.0.read_exact(&mut bytes)?;
        *value = usize::from_le_bytes(bytes);
        Ok(())
    }
}

impl<R: Read> VisitMut<char> for Refill<R> {
    fn visit_mut(&mut self, value: &mut char) -> io::Result<()> {
        let mut bytes = [0; 4];
        self.0.read_exact(&mut bytes)?;
        *value = char::from_u32(u32::from_le_bytes(bytes))
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "invalid char"))?;
        Ok(())
    }
}

fn read_u64(input: &mut impl Read) -> io::Result<u64> {
    let mut bytes = [0; 8];
    input.read_exact(&mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}

fn serialize(elements: &[Element]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    out.write_all(&(elements.len() as u64).to_le_bytes())?;
    for element in elements {
        out.write_all(&(element.ordinal() as u64).to_le_bytes())?;
        element.visit(Dump(&mut out))?;
    }
    Ok(out)
}

fn deserialize(mut input: &[u8]) -> Result<Vec<Element>, DecodeError> {
    let count = read_u64(&mut input)?;
    let mut elements = Vec::new();
    for _ in 0..count {
        let ordinal = read_u64(&mut input)? as usize;
        let (element, refilled) = Element::emplace_with(ordinal, (), Refill(&mut input))?;
        refilled?;
        elements.push(element);
    }
    Ok(elements)
}

#[test]
fn round_trip() {
    let elements: Vec<Element> = vec![Sum::new(42usize), Sum::new('a'), Sum::new('b')];

    let bytes = serialize(&elements).unwrap();
    assert_eq!(bytes.len(), 8 + (8 + size_of::<usize>()) + 2 * (8 + 4));

    let decoded = deserialize(&bytes).unwrap();
    assert_eq!(decoded, elements);
}

#[test]
fn unknown_ordinal_is_rejected() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1u64.to_le_bytes());
    bytes.extend_from_slice(&7u64.to_le_bytes());

    match deserialize(&bytes) {
        Err(DecodeError::Ordinal(err)) => {
            assert_eq!(err, OrdinalError::OutOfRange { ordinal: 7, count: 2 })
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn truncated_payload_is_rejected() {
    let elements: Vec<Element> = vec![Sum::new('x')];
    let mut bytes = serialize(&elements).unwrap();
    bytes.pop();

    assert!(matches!(deserialize(&bytes), Err(DecodeError::Io(_))));
}
