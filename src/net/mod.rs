//! # 流网络核心定义（Residual Flow Network）
//!
//! 设顶点集合 `V` 与有向边集合 `E`，每条边携带容量 `cap ≥ 0` 与费用
//! `cost`（允许为负）。网络以残量形式存储：插入边 `(u, v)` 时同时物化
//! 正向弧与一条容量为 0、费用取负的反向配对弧。对任意推流量 `f`：
//!
//! * 正向弧容量减少 `f`，配对弧容量增加 `f`，弧对总容量守恒；
//! * 容量永不为负，推流是构造之后唯一的变更途径。
//!
//! 提供的核心 API 支持：
//! * O(1) 弧对插入、按句柄访问与配对定位；
//! * 原始边按插入序保留，可回读每条边承载的流量与残量；
//! * 源点可达性计算与连通性诊断；
//! * DIMACS 实例读取、JSON/RON 快照与 Graphviz 导出。
//!
//! ## 示例
//!
//! ```rust
//! use RustMCF::net::*;
//!
//! let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(2);
//! let s = VertexId::new(0);
//! let t = VertexId::new(1);
//! let edge = net.add_edge(s, t, 5, 3);
//!
//! let forward = net.edge(edge).forward;
//! net.push(forward, 2);
//! assert_eq!(net.flow_on(edge), 2);
//! assert_eq!(net.residual(edge), 3);
//! ```

pub mod core;
pub mod ids;
pub mod index_vec;
pub mod io;
pub mod structure;

pub use self::core::{ArcRow, DiagnosticReport, FlowNetwork};
pub use ids::{EdgeId, VertexId};
pub use index_vec::{Idx, IndexVec};
pub use io::{DimacsError, DimacsProblem, EdgeFlow, IoError, SolveReport};
pub use structure::{Arc, ArcRef, EdgeRecord, FlowTotals};
