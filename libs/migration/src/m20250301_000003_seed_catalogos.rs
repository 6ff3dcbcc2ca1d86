use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Departments with their DANE division codes
        db.execute_unprepared(
            r#"
            INSERT INTO departamentos (nombre, codigo_dane)
            VALUES
                ('Amazonas', '91'),
                ('Antioquia', '05'),
                ('Arauca', '81'),
                ('Atlántico', '08'),
                ('Bogotá D.C.', '11'),
                ('Bolívar', '13'),
                ('Boyacá', '15'),
                ('Caldas', '17'),
                ('Caquetá', '18'),
                ('Casanare', '85'),
                ('Cauca', '19'),
                ('Cesar', '20'),
                ('Chocó', '27'),
                ('Córdoba', '23'),
                ('Cundinamarca', '25'),
                ('Guainía', '94'),
                ('Guaviare', '95'),
                ('Huila', '41'),
                ('La Guajira', '44'),
                ('Magdalena', '47'),
                ('Meta', '50'),
                ('Nariño', '52'),
                ('Norte de Santander', '54'),
                ('Putumayo', '86'),
                ('Quindío', '63'),
                ('Risaralda', '66'),
                ('San Andrés y Providencia', '88'),
                ('Santander', '68'),
                ('Sucre', '70'),
                ('Tolima', '73'),
                ('Valle del Cauca', '76'),
                ('Vaupés', '97'),
                ('Vichada', '99')
            ON CONFLICT (nombre) DO NOTHING
            "#,
        )
        .await?;

        // Capitals and the larger municipalities, joined to their department by DANE code
        db.execute_unprepared(
            r#"
            INSERT INTO ciudades (nombre, departamento_id, codigo_dane)
            SELECT v.nombre, d.id, v.codigo
            FROM (VALUES
                ('Leticia', '91', '91001'),
                ('Medellín', '05', '05001'),
                ('Bello', '05', '05088'),
                ('Envigado', '05', '05266'),
                ('Itagüí', '05', '05360'),
                ('Rionegro', '05', '05615'),
                ('Arauca', '81', '81001'),
                ('Barranquilla', '08', '08001'),
                ('Soledad', '08', '08758'),
                ('Bogotá D.C.', '11', '11001'),
                ('Cartagena de Indias', '13', '13001'),
                ('Tunja', '15', '15001'),
                ('Duitama', '15', '15238'),
                ('Sogamoso', '15', '15759'),
                ('Manizales', '17', '17001'),
                ('Florencia', '18', '18001'),
                ('Yopal', '85', '85001'),
                ('Popayán', '19', '19001'),
                ('Valledupar', '20', '20001'),
                ('Quibdó', '27', '27001'),
                ('Montería', '23', '23001'),
                ('Soacha', '25', '25754'),
                ('Zipaquirá', '25', '25899'),
                ('Fusagasugá', '25', '25290'),
                ('Chía', '25', '25175'),
                ('Inírida', '94', '94001'),
                ('San José del Guaviare', '95', '95001'),
                ('Neiva', '41', '41001'),
                ('Riohacha', '44', '44001'),
                ('Santa Marta', '47', '47001'),
                ('Villavicencio', '50', '50001'),
                ('Pasto', '52', '52001'),
                ('Ipiales', '52', '52356'),
                ('Cúcuta', '54', '54001'),
                ('Mocoa', '86', '86001'),
                ('Armenia', '63', '63001'),
                ('Pereira', '66', '66001'),
                ('Dosquebradas', '66', '66170'),
                ('San Andrés', '88', '88001'),
                ('Bucaramanga', '68', '68001'),
                ('Floridablanca', '68', '68276'),
                ('Sincelejo', '70', '70001'),
                ('Ibagué', '73', '73001'),
                ('Cali', '76', '76001'),
                ('Palmira', '76', '76520'),
                ('Buenaventura', '76', '76109'),
                ('Mitú', '97', '97001'),
                ('Puerto Carreño', '99', '99001')
            ) AS v(nombre, departamento, codigo)
            JOIN departamentos d ON d.codigo_dane = v.departamento
            ON CONFLICT (departamento_id, nombre) DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO tipos_siniestro (nombre, descripcion)
            SELECT v.nombre, v.descripcion
            FROM (VALUES
                ('Choque', 'Colisión entre dos o más vehículos en movimiento'),
                ('Atropello', 'Vehículo que impacta a un peatón'),
                ('Volcamiento', 'Vehículo que pierde su posición normal y gira sobre sí mismo'),
                ('Caída de ocupante', 'Persona que cae desde un vehículo en movimiento'),
                ('Choque con objeto fijo', 'Impacto contra un poste, muro, árbol u otro objeto inmóvil'),
                ('Incendio', 'Fuego originado en el vehículo'),
                ('Otro', 'Siniestro que no corresponde a ninguna de las clases anteriores')
            ) AS v(nombre, descripcion)
            WHERE NOT EXISTS (SELECT 1 FROM tipos_siniestro t WHERE t.nombre = v.nombre)
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DELETE FROM ciudades WHERE id NOT IN (SELECT DISTINCT ciudad_id FROM siniestros)",
        )
        .await?;
        db.execute_unprepared(
            "DELETE FROM tipos_siniestro WHERE id NOT IN (SELECT DISTINCT tipo_siniestro_id FROM siniestros)",
        )
        .await?;
        db.execute_unprepared(
            "DELETE FROM departamentos d WHERE NOT EXISTS (SELECT 1 FROM ciudades c WHERE c.departamento_id = d.id) \
             AND d.id NOT IN (SELECT DISTINCT departamento_id FROM siniestros)",
        )
        .await?;
        Ok(())
    }
}
