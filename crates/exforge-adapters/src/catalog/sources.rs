//! Source text of the generated Express + TypeORM project.
//!
//! `{{NAME}}` is replaced with the record's value for `NAME`, already encoded
//! as a JavaScript literal. `{{env.NAME}}` is replaced with the matching
//! `process.env.NAME` expression. See [`super::placeholders`].

pub(super) const GITIGNORE: &str = "node_modules\ndist\n.env\n";

pub(super) const DATA_SOURCE_JS: &str = r#"require('dotenv').config();
const { DataSource } = require('typeorm');
const User = require('./entities/User');

const AppDataSource = new DataSource({
  type: 'postgres',
  host: {{env.DB_HOST}} || {{DB_HOST}},
  port: Number({{env.DB_PORT}} || {{DB_PORT}}),
  username: {{env.DB_USER}} || {{DB_USER}},
  password: {{env.DB_PASSWORD}},
  database: {{env.DB_NAME}} || {{DB_NAME}},
  synchronize: {{SYNCHRONIZE}},
  logging: false,
  entities: [User],
  migrations: ['src/migrations/*.js'],
});

module.exports = { AppDataSource };
"#;

pub(super) const USER_ENTITY_JS: &str = r#"const { EntitySchema } = require('typeorm');

module.exports = new EntitySchema({
  name: 'User',
  tableName: 'users',
  columns: {
    id: { type: 'uuid', primary: true, generated: 'uuid' },
    email: { type: 'varchar', unique: true },
    passwordHash: { name: 'password_hash', type: 'varchar' },
    fullName: { name: 'full_name', type: 'varchar', nullable: true },
    role: { type: 'varchar', default: 'user' },
    isActive: { name: 'is_active', type: 'boolean', default: true },
    createdAt: { name: 'created_at', type: 'timestamp', createDate: true },
    updatedAt: { name: 'updated_at', type: 'timestamp', updateDate: true },
  },
  indices: [{ name: 'idx_users_email', columns: ['email'], unique: true }],
});
"#;

pub(super) const AUTH_MIDDLEWARE_JS: &str = r#"const jwt = require('jsonwebtoken');

function auth(requiredRole) {
  return (req, res, next) => {
    try {
      const header = req.headers.authorization || '';
      const [, token] = header.split(' ');
      if (!token) return res.status(401).json({ error: 'token required' });
      const payload = jwt.verify(token, {{env.JWT_SECRET}});
      req.user = payload;
      if (requiredRole && payload.role !== requiredRole) {
        return res.status(403).json({ error: 'forbidden' });
      }
      next();
    } catch (e) {
      return res.status(401).json({ error: 'invalid token' });
    }
  };
}

module.exports = { auth };
"#;

pub(super) const AUTH_ROUTES_JS: &str = r#"const { Router } = require('express');
const bcrypt = require('bcryptjs');
const jwt = require('jsonwebtoken');
const { AppDataSource } = require('../data-source');
const { auth } = require('../middlewares/auth');

const router = Router();

function signToken(user) {
  const payload = { sub: user.id, email: user.email, role: user.role };
  return jwt.sign(payload, {{env.JWT_SECRET}}, {
    expiresIn: {{env.JWT_EXPIRES_IN}} || {{JWT_EXPIRES_IN}},
  });
}

function publicUser(user) {
  return { id: user.id, email: user.email, role: user.role, fullName: user.fullName };
}

router.post('/register', async (req, res) => {
  try {
    const { email, password, fullName, role } = req.body || {};
    if (!email || !password) return res.status(400).json({ error: 'email and password are required' });
    const repo = AppDataSource.getRepository('User');
    const exists = await repo.findOne({ where: { email } });
    if (exists) return res.status(409).json({ error: 'email already registered' });
    const passwordHash = await bcrypt.hash(password, 10);
    const user = repo.create({ email, passwordHash, fullName: fullName || null, role: role || 'user' });
    await repo.save(user);
    return res.status(201).json({ token: signToken(user), user: publicUser(user) });
  } catch (e) {
    return res.status(500).json({ error: 'registration failed' });
  }
});

router.post('/login', async (req, res) => {
  try {
    const { email, password } = req.body || {};
    if (!email || !password) return res.status(400).json({ error: 'email and password are required' });
    const repo = AppDataSource.getRepository('User');
    const user = await repo.findOne({ where: { email } });
    if (!user) return res.status(401).json({ error: 'invalid credentials' });
    const ok = await bcrypt.compare(password, user.passwordHash);
    if (!ok) return res.status(401).json({ error: 'invalid credentials' });
    return res.json({ token: signToken(user), user: publicUser(user) });
  } catch (e) {
    return res.status(500).json({ error: 'login failed' });
  }
});

router.get('/me', auth(), async (req, res) => {
  const repo = AppDataSource.getRepository('User');
  const user = await repo.findOne({ where: { id: req.user.sub } });
  if (!user) return res.status(404).json({ error: 'not found' });
  delete user.passwordHash;
  res.json(user);
});

module.exports = router;
"#;

pub(super) const USER_ROUTES_JS: &str = r#"const { Router } = require('express');
const bcrypt = require('bcryptjs');
const { AppDataSource } = require('../data-source');
const { auth } = require('../middlewares/auth');

const router = Router();

router.get('/', auth(), async (req, res) => {
  const repo = AppDataSource.getRepository('User');
  const users = await repo.find({
    select: ['id', 'email', 'fullName', 'role', 'isActive', 'createdAt', 'updatedAt'],
  });
  res.json(users);
});

router.post('/', auth('admin'), async (req, res) => {
  try {
    const { email, password, fullName, role } = req.body || {};
    if (!email || !password) return res.status(400).json({ error: 'email and password are required' });
    const repo = AppDataSource.getRepository('User');
    const exists = await repo.findOne({ where: { email } });
    if (exists) return res.status(409).json({ error: 'email already registered' });
    const passwordHash = await bcrypt.hash(password, 10);
    const user = repo.create({ email, passwordHash, fullName: fullName || null, role: role || 'user' });
    await repo.save(user);
    res.status(201).json({
      id: user.id,
      email: user.email,
      fullName: user.fullName,
      role: user.role,
      isActive: user.isActive,
    });
  } catch (e) {
    res.status(500).json({ error: 'could not create user' });
  }
});

router.get('/:id', auth(), async (req, res) => {
  const repo = AppDataSource.getRepository('User');
  const user = await repo.findOne({ where: { id: req.params.id } });
  if (!user) return res.status(404).json({ error: 'not found' });
  delete user.passwordHash;
  res.json(user);
});

router.patch('/:id', auth('admin'), async (req, res) => {
  const repo = AppDataSource.getRepository('User');
  const user = await repo.findOne({ where: { id: req.params.id } });
  if (!user) return res.status(404).json({ error: 'not found' });
  const { fullName, role, isActive, password } = req.body || {};
  if (fullName !== undefined) user.fullName = fullName;
  if (role !== undefined) user.role = role;
  if (isActive !== undefined) user.isActive = !!isActive;
  if (password) user.passwordHash = await bcrypt.hash(password, 10);
  await repo.save(user);
  delete user.passwordHash;
  res.json(user);
});

router.delete('/:id', auth('admin'), async (req, res) => {
  const repo = AppDataSource.getRepository('User');
  const user = await repo.findOne({ where: { id: req.params.id } });
  if (!user) return res.status(404).json({ error: 'not found' });
  await repo.remove(user);
  res.status(204).end();
});

module.exports = router;
"#;

pub(super) const SEED_JS: &str = r#"require('dotenv').config();
const bcrypt = require('bcryptjs');
const { AppDataSource } = require('./data-source');

const database = {{env.DB_NAME}} || {{DB_NAME}};

async function main() {
  await AppDataSource.initialize();
  if (!AppDataSource.options.synchronize) {
    await AppDataSource.runMigrations();
  }
  const repo = AppDataSource.getRepository('User');
  const email = process.env.SEED_ADMIN_EMAIL || 'admin@local.test';
  const pass = process.env.SEED_ADMIN_PASSWORD || 'admin123';
  const fullName = process.env.SEED_ADMIN_NAME || 'Admin';
  const role = 'admin';
  const exists = await repo.findOne({ where: { email } });
  if (exists) {
    console.log('Admin already exists in ' + database + ':', email);
    await AppDataSource.destroy();
    return;
  }
  const passwordHash = await bcrypt.hash(pass, 10);
  const admin = repo.create({ email, passwordHash, fullName, role, isActive: true });
  await repo.save(admin);
  console.log('Admin created in ' + database + ':', { email, pass });
  await AppDataSource.destroy();
}

main().catch((e) => {
  console.error('Seed error:', e);
  process.exit(1);
});
"#;

pub(super) const INDEX_JS: &str = r#"require('dotenv').config();
const express = require('express');
const helmet = require('helmet');
const cors = require('cors');
const morgan = require('morgan');
const { AppDataSource } = require('./data-source');
const authRouter = require('./routes/auth');
const usersRouter = require('./routes/users');

const app = express();
app.use(express.json());
app.use(helmet());
app.use(cors());
app.use(morgan('dev'));
app.get('/health', (req, res) => res.json({ ok: true, ts: Date.now() }));
app.use('/auth', authRouter);
app.use('/users', usersRouter);

const PORT = {{env.PORT}} || {{PORT}};

AppDataSource.initialize()
  .then(() => {
    console.log('Database connected');
    app.listen(PORT, () => console.log('API listening on http://localhost:' + PORT));
  })
  .catch((err) => {
    console.error('Failed to initialize DataSource:', err?.message || err);
    process.exit(1);
  });
"#;
