//! RSP command transforms.
//!
//! Vertex indices in triangle, cull and modify-vertex commands are stored
//! doubled (byte offsets into the vertex buffer, two bytes per entry in the
//! microcode's index table); the transforms here halve and double them.

use super::{CommandSpec, command, no_args, no_values, raw_args, raw_values};
use crate::common::arg::Arg;
use crate::common::error::Result;
use crate::isa::decode::DecodeContext;
use crate::isa::encode::ArgList;
use crate::isa::geometry;
use crate::isa::layout;
use crate::isa::opcodes::Opcode;
use crate::isa::symbols::{DMA, MOVEMEM_INDEX, MOVEWORD_INDEX, MTX_PARAM, MWO_POINT};

command!(SPNOOP, SpNoop, "gsSPNoOp", layout::SPNOOP, 0, no_args, no_values);
command!(VTX, Vtx, "gsSPVertex", layout::VTX, 3, encode_vtx, decode_vtx);
command!(MODIFYVTX, ModifyVtx, "gsSPModifyVertex", layout::MODIFYVTX, 3, encode_modify_vtx, decode_modify_vtx);
command!(CULLDL, CullDl, "gsSPCullDisplayList", layout::CULLDL, 2, encode_doubled, decode_halved);
command!(BRANCH_Z, BranchZ, "gsSPBranchLessZ", layout::BRANCH_Z, 4, encode_branch_z, decode_branch_z);
command!(TRI1, Tri1, "gsSP1Triangle", layout::TRI1, 3, encode_doubled, decode_halved);
command!(TRI2, Tri2, "gsSP2Triangles", layout::TRI2, 6, encode_doubled, decode_halved);
command!(QUAD, Quad, "gsSP1Quadrangle", layout::QUAD, 6, encode_doubled, decode_halved);
command!(DMA_IO, DmaIo, "gsSPDma_io", layout::DMA_IO, 4, encode_dma_io, decode_dma_io);
command!(TEXTURE, Texture, "gsSPTexture", layout::TEXTURE, 5, encode_texture, raw_values);
command!(POPMTX, PopMtx, "gsSPPopMatrixN", layout::POPMTX, 1, encode_popmtx, decode_popmtx);
command!(GEOMETRYMODE, GeometryMode, "gsSPGeometryMode", layout::GEOMETRYMODE, 2, encode_geometry, decode_geometry);
command!(MTX, Mtx, "gsSPMatrix", layout::MTX, 2, encode_mtx, raw_values);
command!(MOVEWORD, MoveWord, "gsMoveWd", layout::MOVEWORD, 3, encode_moveword, decode_moveword);
command!(MOVEMEM, MoveMem, "gsSPMoveMem", layout::MOVEMEM, 4, encode_movemem, decode_movemem);
command!(LOAD_UCODE, LoadUcode, "gsSPLoadUcodeEx", layout::LOAD_UCODE, 3, raw_args, raw_values);
command!(DL, Dl, "gsSPDisplayList", layout::DL, 2, raw_args, decode_dl);
command!(ENDDL, EndDl, "gsSPEndDisplayList", layout::ENDDL, 0, no_args, no_values);
command!(NOOP, Noop, "gsDPNoOp", layout::NOOP, 0, no_args, no_values);
command!(RDPHALF_1, RdpHalf1, "G_RDPHALF_1", layout::RDPHALF_1, 1, raw_args, raw_values);

/// Size in bytes of one 4x4 matrix on the matrix stack.
const MATRIX_BYTES: i64 = 64;

fn encode_vtx(args: &ArgList<'_>) -> Result<Vec<i64>> {
    let count = args.int(0, "count")?;
    let start = args.int(1, "start")?;
    let address = args.int(2, "address")?;
    let end = start.checked_add(count).and_then(|end| end.checked_mul(2));
    Ok(vec![count, args.checked("end", end)?, address])
}

fn decode_vtx(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[count, end, address] = values else {
        return raw_values(values, ctx);
    };
    vec![Arg::Int(count), Arg::Int(end / 2 - count), Arg::Int(address)]
}

fn encode_modify_vtx(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.symbol(0, &MWO_POINT)?,
        args.scaled(1, "vertex", 2)?,
        args.int(2, "value")?,
    ])
}

fn decode_modify_vtx(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[point, vertex, value] = values else {
        return raw_values(values, ctx);
    };
    vec![MWO_POINT.symbolize(point), Arg::Int(vertex / 2), Arg::Int(value)]
}

/// Every argument is a vertex index stored doubled.
fn encode_doubled(args: &ArgList<'_>) -> Result<Vec<i64>> {
    args.ints()?
        .into_iter()
        .map(|v| args.checked("vertex", v.checked_mul(2)))
        .collect()
}

fn decode_halved(values: &[i64], _ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    values.iter().map(|v| Arg::Int(v / 2)).collect()
}

fn encode_branch_z(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.int(0, "address")?,
        args.scaled(1, "vertex_x5", 5)?,
        args.scaled(2, "vertex_x2", 2)?,
        args.int(3, "zval")?,
    ])
}

fn decode_branch_z(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[address, a, b, zval] = values else {
        return raw_values(values, ctx);
    };
    vec![Arg::Int(address), Arg::Int(a / 5), Arg::Int(b / 2), Arg::Int(zval)]
}

fn encode_dma_io(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.symbol(0, &DMA)?,
        args.int(1, "dmem")? >> 3,
        args.int(2, "size")?,
        args.int(3, "dram")?,
    ])
}

fn decode_dma_io(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[flag, dmem, size, dram] = values else {
        return raw_values(values, ctx);
    };
    vec![DMA.symbolize(flag), Arg::Int(dmem << 3), Arg::Int(size), Arg::Int(dram)]
}

/// Texture scales are 16-bit; negative scales are stored as their two's complement.
fn encode_texture(args: &ArgList<'_>) -> Result<Vec<i64>> {
    let scale = |index: usize, field: &'static str| -> Result<i64> {
        match args.int(index, field)? {
            s @ -0x8000..0 => Ok(s + 0x1_0000),
            s => Ok(s),
        }
    };
    Ok(vec![
        args.int(0, "level")?,
        args.int(1, "tile")?,
        args.int(2, "on")?,
        scale(3, "s")?,
        scale(4, "t")?,
    ])
}

fn encode_popmtx(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![args.scaled(0, "count", MATRIX_BYTES)?])
}

fn decode_popmtx(values: &[i64], _ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    values.iter().map(|bytes| Arg::Int(bytes / MATRIX_BYTES)).collect()
}

fn encode_geometry(args: &ArgList<'_>) -> Result<Vec<i64>> {
    let clear = geometry::encode_clear(args.get(0)?)?;
    let set = geometry::resolve(args.get(1)?)?;
    Ok(vec![clear, i64::from(set)])
}

fn decode_geometry(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[clear, set] = values else {
        return raw_values(values, ctx);
    };
    vec![geometry::decode_clear(clear), geometry::symbolize(set as u32)]
}

fn encode_mtx(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![args.symbol(0, &MTX_PARAM)?, args.int(1, "address")?])
}

/// gbi macro for each `G_MOVEWORD` index.
const fn moveword_macro(index: i64) -> &'static str {
    match index {
        0 => "gsSPInsertMatrix",
        2 => "gsSPNumLights",
        4 => "G_MW_CLIP",
        6 => "gsSPSegment",
        8 => "gsSPFogPosition",
        10 => "gsSPLightColor",
        12 => "G_MW_FORCEMTX",
        14 => "gsSPPerspNormalize",
        _ => "gsMoveWd",
    }
}

fn encode_moveword(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.symbol(0, &MOVEWORD_INDEX)?,
        args.int(1, "offset")?,
        args.int(2, "value")?,
    ])
}

fn decode_moveword(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[index, offset, value] = values else {
        return raw_values(values, ctx);
    };
    ctx.set_name(moveword_macro(index));
    vec![MOVEWORD_INDEX.symbolize(index), Arg::Int(offset), Arg::Int(value)]
}

fn encode_movemem(args: &ArgList<'_>) -> Result<Vec<i64>> {
    let size = args.int(0, "size")?;
    if size < 1 {
        return Err(args.invalid("size", format!("{size} is not a positive byte count")));
    }
    Ok(vec![
        ((size - 1) / 8) << 3,
        args.int(1, "offset")? / 8,
        args.symbol(2, &MOVEMEM_INDEX)?,
        args.int(3, "address")?,
    ])
}

fn decode_movemem(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[size, offset, index, address] = values else {
        return raw_values(values, ctx);
    };
    vec![
        Arg::Int(((size >> 3) + 1) << 3),
        Arg::Int(offset * 8),
        MOVEMEM_INDEX.symbolize(index),
        Arg::Int(address),
    ]
}

fn decode_dl(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    if values.first().is_some_and(|&push| push != 0) {
        ctx.set_name("gsSPBranchList");
    }
    raw_values(values, ctx)
}
