//! I/O 支持：DIMACS 最小费用流实例、JSON/RON 快照与求解报告。
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::net::core::FlowNetwork;
use crate::net::ids::VertexId;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),
    #[error("ron parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn to_json_string<T>(value: &T) -> Result<String, IoError>
where
    T: Serialize,
{
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn from_json_str<T>(s: &str) -> Result<T, IoError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_str(s)?)
}

pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<(), IoError> {
    let mut file = File::create(path)?;
    let content = to_json_string(value)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn read_json<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T, IoError> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    from_json_str(&content)
}

pub fn to_ron_string<T>(value: &T) -> Result<String, IoError>
where
    T: Serialize,
{
    let mut pretty = PrettyConfig::default();
    pretty.new_line = "\n".into();
    Ok(ron::ser::to_string_pretty(value, pretty)?)
}

pub fn from_ron_str<T>(s: &str) -> Result<T, IoError>
where
    T: DeserializeOwned,
{
    Ok(ron::from_str(s)?)
}

pub fn write_ron<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<(), IoError> {
    let mut file = File::create(path)?;
    let content = to_ron_string(value)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn read_ron<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T, IoError> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    from_ron_str(&content)
}

/// DIMACS 最小费用流实例读取错误，逐行定位。
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("line {line}: unknown descriptor '{descriptor}'")]
    UnknownDescriptor { line: usize, descriptor: String },
    #[error("missing problem line 'p min <vertices> <arcs>'")]
    MissingProblemLine,
    #[error("expected exactly one supply and one demand node, got {supplies} and {demands}")]
    BadNodeDescriptors { supplies: usize, demands: usize },
    #[error("supply {supply} and demand {demand} do not balance")]
    UnbalancedSupply { supply: i64, demand: i64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A parsed DIMACS `min` instance: the network plus the single-commodity
/// source/sink pair and the requested amount of flow between them.
#[derive(Debug, Clone)]
pub struct DimacsProblem {
    pub network: FlowNetwork<i64, i64>,
    pub source: VertexId,
    pub sink: VertexId,
    pub quantity: i64,
}

/// Parses the DIMACS minimum-cost-flow format.
///
/// Supported descriptors: `c` comments, one `p min <vertices> <arcs>` problem
/// line, `n <id> <supply>` node lines (exactly one positive supply and one
/// negative demand of equal magnitude) and `a <from> <to> <low> <cap> <cost>`
/// arc lines with a zero lower bound. Ids are 1-based in the file.
pub fn parse_dimacs(input: &str) -> Result<DimacsProblem, DimacsError> {
    let mut network: Option<FlowNetwork<i64, i64>> = None;
    let mut declared_arcs = 0usize;
    let mut parsed_arcs = 0usize;
    let mut source: Option<(VertexId, i64)> = None;
    let mut sink: Option<(VertexId, i64)> = None;
    let mut supplies = 0usize;
    let mut demands = 0usize;

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let mut fields = raw.split_whitespace();
        let Some(descriptor) = fields.next() else {
            continue;
        };
        let rest: Vec<&str> = fields.collect();

        match descriptor {
            "c" => continue,
            "p" => {
                if network.is_some() {
                    return Err(malformed(line, "duplicate problem line"));
                }
                if rest.len() != 3 {
                    return Err(malformed(line, "expected 'p min <vertices> <arcs>'"));
                }
                if rest[0] != "min" {
                    return Err(malformed(
                        line,
                        format!("expected problem type 'min', got '{}'", rest[0]),
                    ));
                }
                let vertices: usize = parse_field(rest[1], line, "vertex count")?;
                declared_arcs = parse_field(rest[2], line, "arc count")?;
                network = Some(FlowNetwork::with_vertices(vertices));
            }
            "n" => {
                let net = network
                    .as_ref()
                    .ok_or_else(|| malformed(line, "node descriptor before problem line"))?;
                if rest.len() != 2 {
                    return Err(malformed(line, "expected 'n <id> <supply>'"));
                }
                let vertex = parse_vertex(rest[0], line, net.vertex_count())?;
                let supply: i64 = parse_field(rest[1], line, "supply")?;
                if supply > 0 {
                    supplies += 1;
                    source = Some((vertex, supply));
                } else if supply < 0 {
                    demands += 1;
                    sink = Some((vertex, supply));
                } else {
                    return Err(malformed(line, "node supply must be nonzero"));
                }
            }
            "a" => {
                let net = network
                    .as_mut()
                    .ok_or_else(|| malformed(line, "arc descriptor before problem line"))?;
                if rest.len() != 5 {
                    return Err(malformed(line, "expected 'a <from> <to> <low> <cap> <cost>'"));
                }
                let vertex_count = net.vertex_count();
                let from = parse_vertex(rest[0], line, vertex_count)?;
                let to = parse_vertex(rest[1], line, vertex_count)?;
                let low: i64 = parse_field(rest[2], line, "lower bound")?;
                if low != 0 {
                    return Err(malformed(line, "nonzero lower bounds are not supported"));
                }
                let capacity: i64 = parse_field(rest[3], line, "capacity")?;
                if capacity < 0 {
                    return Err(malformed(line, "arc capacity must be non-negative"));
                }
                let cost: i64 = parse_field(rest[4], line, "cost")?;
                net.add_edge(from, to, capacity, cost);
                parsed_arcs += 1;
            }
            other => {
                return Err(DimacsError::UnknownDescriptor {
                    line,
                    descriptor: other.to_string(),
                });
            }
        }
    }

    let network = network.ok_or(DimacsError::MissingProblemLine)?;
    if supplies != 1 || demands != 1 {
        return Err(DimacsError::BadNodeDescriptors { supplies, demands });
    }
    let (source, supply) = source.expect("counted one supply");
    let (sink, demand) = sink.expect("counted one demand");
    if supply != -demand {
        return Err(DimacsError::UnbalancedSupply { supply, demand });
    }
    if parsed_arcs != declared_arcs {
        log::warn!(
            "problem line declares {} arcs but {} were given",
            declared_arcs,
            parsed_arcs
        );
    }

    Ok(DimacsProblem {
        network,
        source,
        sink,
        quantity: supply,
    })
}

pub fn read_dimacs<P: AsRef<Path>>(path: P) -> Result<DimacsProblem, DimacsError> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    parse_dimacs(&content)
}

fn malformed(line: usize, message: impl Into<String>) -> DimacsError {
    DimacsError::Malformed {
        line,
        message: message.into(),
    }
}

fn parse_field<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, DimacsError> {
    token
        .parse()
        .map_err(|_| malformed(line, format!("invalid {what} '{token}'")))
}

fn parse_vertex(token: &str, line: usize, vertex_count: usize) -> Result<VertexId, DimacsError> {
    let id: usize = parse_field(token, line, "vertex id")?;
    if id == 0 || id > vertex_count {
        return Err(malformed(
            line,
            format!("vertex id {id} outside 1..={vertex_count}"),
        ));
    }
    Ok(VertexId::new((id - 1) as u32))
}

/// 求解报告，可序列化为 JSON 供外部工具消费。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport<C, D> {
    pub vertices: usize,
    pub edges: usize,
    pub source: VertexId,
    pub sink: VertexId,
    pub total_flow: C,
    pub total_cost: D,
    pub potentials: Vec<D>,
    pub edge_flows: Vec<EdgeFlow<C, D>>,
}

/// Per-edge row of a [`SolveReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeFlow<C, D> {
    pub from: VertexId,
    pub to: VertexId,
    pub flow: C,
    pub capacity: C,
    pub cost: D,
}

impl<C, D> SolveReport<C, D>
where
    C: crate::numeric::Capacity,
    D: crate::numeric::Cost,
{
    /// Assembles a report from a solved network and its final potentials.
    pub fn collect(
        network: &FlowNetwork<C, D>,
        source: VertexId,
        sink: VertexId,
        total_flow: C,
        total_cost: D,
        potentials: impl Iterator<Item = D>,
    ) -> Self {
        let edge_flows = network
            .edges()
            .map(|(id, edge)| EdgeFlow {
                from: edge.from,
                to: edge.to,
                flow: network.flow_on(id),
                capacity: edge.capacity,
                cost: edge.cost,
            })
            .collect();
        Self {
            vertices: network.vertex_count(),
            edges: network.edge_count(),
            source,
            sink,
            total_flow,
            total_cost,
            potentials: potentials.collect(),
            edge_flows,
        }
    }
}
