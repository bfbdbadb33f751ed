//! POLYLINE with its VERTEX children and closing SEQEND

use super::seqend::SeqEnd;
use super::EntityCommon;
use crate::error::{DxfError, Result};
use crate::io::dxf::codec::{
    read_entity, read_point, write_entity, write_extrusion, write_marker, EntityCodec, ReadContext,
};
use crate::io::dxf::config::DxfConfiguration;
use crate::io::dxf::reader::{DxfCodePair, DxfStreamReader};
use crate::io::dxf::writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::types::{DxfVersion, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Polyline flag word on code `70`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PolylineFlags: i16 {
        const CLOSED = 1;
        const CURVE_FIT = 2;
        const SPLINE_FIT = 4;
        const POLYLINE_3D = 8;
        const POLYGON_MESH = 16;
        const MESH_CLOSED_N = 32;
        const POLYFACE_MESH = 64;
        const CONTINUOUS_LINETYPE = 128;
    }
}

bitflags! {
    /// Vertex flag word on code `70`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VertexFlags: i16 {
        const EXTRA_VERTEX = 1;
        const CURVE_FIT_TANGENT = 2;
        const SPLINE_VERTEX = 8;
        const SPLINE_FRAME = 16;
        const POLYLINE_3D = 32;
        const POLYGON_MESH = 64;
        const POLYFACE_MESH = 128;
    }
}

/// One vertex of a POLYLINE
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub common: EntityCommon,
    pub location: Vector3,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
    pub flags: VertexFlags,
    /// Curve-fit tangent direction in degrees
    pub tangent_direction: f64,
    /// Polyface mesh vertex indices (`71`..`74`), 1-based, negative when
    /// the edge is invisible
    pub face_indices: [i16; 4],
}

impl Vertex {
    pub fn new() -> Self {
        Vertex {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            start_width: 0.0,
            end_width: 0.0,
            bulge: 0.0,
            flags: VertexFlags::empty(),
            tangent_direction: 0.0,
            face_indices: [0; 4],
        }
    }

    pub fn at(location: Vector3) -> Self {
        Vertex {
            location,
            ..Self::new()
        }
    }

    pub fn with_bulge(location: Vector3, bulge: f64) -> Self {
        Vertex {
            location,
            bulge,
            ..Self::new()
        }
    }

    fn kind_marker(&self) -> &'static str {
        let mesh = self.flags.contains(VertexFlags::POLYGON_MESH);
        let face = self.flags.contains(VertexFlags::POLYFACE_MESH);
        match (face, mesh) {
            (true, true) => "AcDbPolyFaceMeshVertex",
            (true, false) => "AcDbFaceRecord",
            (false, true) => "AcDbPolygonMeshVertex",
            _ if self.flags.contains(VertexFlags::POLYLINE_3D) => "AcDb3dPolylineVertex",
            _ => "AcDb2dVertex",
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Vertex);

impl EntityCodec for Vertex {
    const NAME: &'static str = "VERTEX";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &[
        "AcDbVertex",
        "AcDb2dVertex",
        "AcDb3dPolylineVertex",
        "AcDbPolygonMeshVertex",
        "AcDbPolyFaceMeshVertex",
        "AcDbFaceRecord",
    ];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            10 | 20 | 30 => read_point(&mut self.location, pair)?,
            40 => self.start_width = pair.as_double()?,
            41 => self.end_width = pair.as_double()?,
            42 => self.bulge = pair.as_double()?,
            50 => self.tangent_direction = pair.as_double()?,
            70 => self.flags = VertexFlags::from_bits_truncate(pair.as_i16()?),
            71..=74 => self.face_indices[(pair.code - 71) as usize] = pair.as_i16()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, "AcDbVertex", config)?;
        write_marker(w, self.kind_marker(), config)?;
        w.write_point3d(10, self.location)?;
        if self.start_width != 0.0 {
            w.write_double(40, self.start_width)?;
        }
        if self.end_width != 0.0 {
            w.write_double(41, self.end_width)?;
        }
        if self.bulge != 0.0 {
            w.write_double(42, self.bulge)?;
        }
        w.write_i16(70, self.flags.bits())?;
        if self.tangent_direction != 0.0 {
            w.write_double(50, self.tangent_direction)?;
        }
        for (i, index) in self.face_indices.iter().enumerate() {
            if *index != 0 {
                w.write_i16(71 + i as i32, *index)?;
            }
        }
        Ok(())
    }
}

/// A 2D/3D polyline, polygon mesh or polyface mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub common: EntityCommon,
    /// Vertices-follow flag (`66`); must be 1 when written
    pub vertices_follow: i16,
    /// Z of the dummy `10` point
    pub elevation: f64,
    pub flags: PolylineFlags,
    pub default_start_width: f64,
    pub default_end_width: f64,
    /// Mesh M vertex count, or polyface vertex count
    pub mesh_m_count: i16,
    /// Mesh N vertex count, or polyface face count
    pub mesh_n_count: i16,
    pub smooth_m_density: i16,
    pub smooth_n_density: i16,
    /// 0 none, 5 quadratic, 6 cubic, 8 Bezier
    pub smooth_surface_type: i16,
    /// Children in input order
    pub vertices: Vec<Vertex>,
    pub seqend: SeqEnd,
}

impl Polyline {
    pub fn new() -> Self {
        Polyline {
            common: EntityCommon::new(),
            vertices_follow: 1,
            elevation: 0.0,
            flags: PolylineFlags::empty(),
            default_start_width: 0.0,
            default_end_width: 0.0,
            mesh_m_count: 0,
            mesh_n_count: 0,
            smooth_m_density: 0,
            smooth_n_density: 0,
            smooth_surface_type: 0,
            vertices: Vec::new(),
            seqend: SeqEnd::new(),
        }
    }

    /// An open 2D polyline through `points`.
    pub fn from_points(points: impl IntoIterator<Item = Vector3>) -> Self {
        Polyline {
            vertices: points.into_iter().map(Vertex::at).collect(),
            ..Self::new()
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.flags.set(PolylineFlags::CLOSED, closed);
    }

    fn kind_marker(&self) -> &'static str {
        if self.flags.contains(PolylineFlags::POLYFACE_MESH) {
            "AcDbPolyFaceMesh"
        } else if self.flags.contains(PolylineFlags::POLYGON_MESH) {
            "AcDbPolygonMesh"
        } else if self.flags.contains(PolylineFlags::POLYLINE_3D) {
            "AcDb3dPolyline"
        } else {
            "AcDb2dPolyline"
        }
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Polyline);

impl EntityCodec for Polyline {
    const NAME: &'static str = "POLYLINE";
    const INTRODUCED: DxfVersion = DxfVersion::R10;
    const SUBCLASS_MARKERS: &'static [&'static str] = &[
        "AcDb2dPolyline",
        "AcDb3dPolyline",
        "AcDbPolygonMesh",
        "AcDbPolyFaceMesh",
    ];

    fn read_code(&mut self, pair: &DxfCodePair, _ctx: &mut ReadContext<'_>) -> Result<bool> {
        match pair.code {
            66 => self.vertices_follow = pair.as_i16()?,
            10 | 20 => {
                pair.as_double()?;
            }
            30 => self.elevation = pair.as_double()?,
            70 => self.flags = PolylineFlags::from_bits_truncate(pair.as_i16()?),
            40 => self.default_start_width = pair.as_double()?,
            41 => self.default_end_width = pair.as_double()?,
            71 => self.mesh_m_count = pair.as_i16()?,
            72 => self.mesh_n_count = pair.as_i16()?,
            73 => self.smooth_m_density = pair.as_i16()?,
            74 => self.smooth_n_density = pair.as_i16()?,
            75 => self.smooth_surface_type = pair.as_i16()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn read_children(&mut self, reader: &mut dyn DxfStreamReader, ctx: &mut ReadContext<'_>) -> Result<()> {
        while let Some(pair) = reader.read_pair()? {
            if pair.code != 0 {
                reader.push_back(pair);
                break;
            }
            match pair.value.trim() {
                "VERTEX" => {
                    let vertex = read_entity::<Vertex>(reader, ctx)?;
                    self.vertices.push(vertex);
                }
                "SEQEND" => {
                    self.seqend = read_entity::<SeqEnd>(reader, ctx)?;
                    return Ok(());
                }
                other => {
                    ctx.warn(
                        "read_polyline",
                        format!("vertex run ended by {} without SEQEND", other),
                    );
                    reader.push_back(pair);
                    return Ok(());
                }
            }
        }
        ctx.warn("read_polyline", "stream ended before SEQEND");
        Ok(())
    }

    fn validate(&self, _config: &DxfConfiguration) -> Result<()> {
        if self.vertices_follow != 1 {
            return Err(DxfError::validation(
                Self::NAME,
                format!("vertices-follow flag is {}, expected 1", self.vertices_follow),
            ));
        }
        Ok(())
    }

    fn write_body(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        write_marker(w, self.kind_marker(), config)?;
        w.write_i16(66, self.vertices_follow)?;
        w.write_point3d(10, Vector3::new(0.0, 0.0, self.elevation))?;
        w.write_i16(70, self.flags.bits())?;
        if self.default_start_width != 0.0 {
            w.write_double(40, self.default_start_width)?;
        }
        if self.default_end_width != 0.0 {
            w.write_double(41, self.default_end_width)?;
        }
        let mesh = [
            (71, self.mesh_m_count),
            (72, self.mesh_n_count),
            (73, self.smooth_m_density),
            (74, self.smooth_n_density),
            (75, self.smooth_surface_type),
        ];
        for (code, value) in mesh {
            if value != 0 {
                w.write_i16(code, value)?;
            }
        }
        write_extrusion(w, &self.common, config)
    }

    fn write_children(&self, w: &mut dyn DxfStreamWriter, config: &DxfConfiguration) -> Result<()> {
        for vertex in &self.vertices {
            write_entity(w, vertex, config)?;
        }
        write_entity(w, &self.seqend, config)
    }
}
